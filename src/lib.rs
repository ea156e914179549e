// src/lib.rs

//! _navmergelib_ merges raw NMEA navigation logs into instrument session
//! archives.
//!
//! The instrument (an ADCP) records in timed sessions, one archive per
//! session, named with the session start datetime. The navigation loggers
//! record continuously. For each session, the navigation sentences logged
//! within the session window are translated to the sentences the
//! instrument's post-processing software understands, written to a
//! positioning file (`.gps`), and packed into a copy of the session
//! archive.
//!
//! The _navmerge_ binary program drives [`run_batch`].
//!
//! [`run_batch`]: crate::processor::batch::run_batch

pub mod common;
pub mod data;
pub mod debug;
pub mod processor;
pub mod readers;
pub mod translate;
pub mod writers;
#[cfg(test)]
pub mod tests;
