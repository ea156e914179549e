// src/writers/mod.rs

//! "Writers" for _navmergelib_.
//!
//! * [`write_gps_file`] writes the positioning file of one session into
//!   the session's working folder.
//! * [`unpack_archive`] fills the working folder from the session archive
//!   and [`repack_session`] packs the working folder into the output
//!   archive.
//!
//! [`write_gps_file`]: crate::writers::gpsfilewriter::write_gps_file
//! [`unpack_archive`]: crate::writers::archiverepacker::unpack_archive
//! [`repack_session`]: crate::writers::archiverepacker::repack_session

pub mod archiverepacker;
pub mod gpsfilewriter;
