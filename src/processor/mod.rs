// src/processor/mod.rs

//! Batch processing for _navmergelib_.
//!
//! [`run_batch`] drives the [readers], the [`SentenceTranslator`], and the
//! [writers] over every session of one batch root directory.
//!
//! [`run_batch`]: crate::processor::batch::run_batch
//! [readers]: crate::readers
//! [writers]: crate::writers
//! [`SentenceTranslator`]: crate::translate::translator::SentenceTranslator

pub mod batch;
pub mod summary;
