// src/data/session.rs

//! Implements [`Session`], one instrument recording unit and its time
//! window.

use std::fmt;
use std::path::PathBuf;

use crate::data::datetime::{dt_in_window, DateTimeU};

/// One instrument recording session, packaged as an archive.
///
/// The window `(window_start, window_end)` is exclusive on both ends.
/// `window_start` is taken from the archive file name. `window_end` is the
/// `window_start` of the following session, or for the last session,
/// `window_start` plus [`WINDOW_LAST_SESSION_HOURS`].
///
/// Created by [`index_sessions`].
///
/// [`WINDOW_LAST_SESSION_HOURS`]: crate::data::datetime::WINDOW_LAST_SESSION_HOURS
/// [`index_sessions`]: crate::readers::sessionindexer::index_sessions
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    /// the instrument's archive, input
    pub archive_path: PathBuf,
    /// working folder where the archive contents are unpacked and the
    /// positioning file is written
    pub extracted_folder_path: PathBuf,
    /// final archive path without any extension
    pub output_archive_path: PathBuf,
    /// archive file name without the instrument extension
    pub name_stem: String,
    pub window_start: DateTimeU,
    pub window_end: DateTimeU,
}

impl Session {
    /// Is `dt` within this session's window?
    pub fn window_contains(
        &self,
        dt: &DateTimeU,
    ) -> bool {
        dt_in_window(dt, &self.window_start, &self.window_end).is_pass()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Session {{ {:?}, window ({}, {}) }}",
            self.name_stem,
            self.window_start.to_rfc3339(),
            self.window_end.to_rfc3339(),
        )
    }
}

pub type Sessions = Vec<Session>;
