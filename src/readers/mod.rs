// src/readers/mod.rs

//! "Readers" for _navmergelib_.
//!
//! ## Overview of readers
//!
//! * [`index_sessions`] derives [`Session`s] from session archive paths
//!   found by [`find_session_archives`].
//! * A [`RawLogReader`] derives [`RawRecord`s] from one raw navigation log
//!   found by [`find_log_files`].
//! * A [`UnifiedRecordTable`] merges and deduplicates the `RawRecord`s of
//!   every log.
//! * [`records_in_window`] slices the `UnifiedRecordTable` per `Session`.
//!
//! <br/>
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`Session`s]: crate::data::session::Session
//! [`RawRecord`s]: crate::data::record::RawRecord
//! [`index_sessions`]: crate::readers::sessionindexer::index_sessions
//! [`find_session_archives`]: crate::readers::sessionindexer::find_session_archives
//! [`RawLogReader`]: crate::readers::rawlogreader::RawLogReader
//! [`find_log_files`]: crate::readers::rawlogreader::find_log_files
//! [`UnifiedRecordTable`]: crate::readers::recordtable::UnifiedRecordTable
//! [`records_in_window`]: crate::readers::correlator::records_in_window

pub mod correlator;
pub mod helpers;
pub mod rawlogreader;
pub mod recordtable;
pub mod sessionindexer;
