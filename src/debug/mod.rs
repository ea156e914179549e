// src/debug/mod.rs

//! The `debug` module is warning and error printers and helpers for
//! debug builds and test builds.

#[cfg(test)]
pub mod helpers;

pub mod printers;
