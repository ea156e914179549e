// src/tests/mod.rs

//! Tests for _navmergelib_.
//!
//! Tests are placed at `src/tests/`, inside the `navmergelib`. This is a
//! reasonable trade-off of separation and access.
//!
//! Tests placed at top-level path `tests/` do not have crate-internal
//! visibility.

pub mod common;
pub mod correlator_tests;
pub mod recordtable_tests;
pub mod translator_tests;
