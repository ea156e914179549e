// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

//! Common imports, type aliases, error helpers, and the batch-level
//! [`BatchError`] for _navmergelib_.

use std::fmt;
use std::io::Error;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;
pub use std::path::Path;

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;
pub type FileOpenOptions = std::fs::OpenOptions;

/// General purpose counting type
pub type Count = u64;

/// Directory name separator used when building suffixed paths
pub const FILES_FOLDER_SUFFIX: &str = "_FILES";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// error helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Create a new `Error` from the passed `error`, with the path and an
/// optional message prepended.
///
/// The `ErrorKind` of the passed `error` is preserved.
pub fn err_from_err_path(
    error: &Error,
    fpath: &FPath,
    mesg: Option<&str>,
) -> Error {
    match mesg {
        Some(mesg_) => Error::new(error.kind(), format!("{} for file {:?}; {}", error, fpath, mesg_)),
        None => Error::new(error.kind(), format!("{} for file {:?}", error, fpath)),
    }
}

/// Wrapper of [`err_from_err_path`] that returns `Err(Error)`.
pub fn err_from_err_path_result<T>(
    error: &Error,
    fpath: &FPath,
    mesg: Option<&str>,
) -> std::io::Result<T> {
    Err(err_from_err_path(error, fpath, mesg))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BatchError
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors that abort an entire batch run.
///
/// Errors local to one session (archive unpack, write, or pack failures)
/// are not a `BatchError`; those are recorded in that session's
/// [`SummarySession`] and the batch continues.
///
/// [`SummarySession`]: crate::processor::summary::SummarySession
#[derive(Debug)]
pub enum BatchError {
    /// A session archive file name does not yield a parseable start
    /// datetime. The windows of every session depend on the name-derived
    /// ordering so the batch cannot continue.
    MalformedSessionName {
        path: FPath,
        reason: String,
    },
    /// Session start datetimes are not strictly increasing in sorted path
    /// order.
    SessionOrder {
        path_prev: FPath,
        path: FPath,
    },
    /// A required input or output directory does not exist.
    MissingDirectory(FPath),
    /// Failure enumerating directories or reading a log file.
    Io {
        path: FPath,
        error: Error,
    },
}

impl BatchError {
    pub const fn is_malformed_session_name(&self) -> bool {
        matches!(*self, BatchError::MalformedSessionName { .. })
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::MalformedSessionName { path, reason } => {
                write!(f, "malformed session name {:?}: {}", path, reason)
            }
            BatchError::SessionOrder { path_prev, path } => {
                write!(
                    f,
                    "session {:?} does not start after prior session {:?}; file names must sort chronologically",
                    path, path_prev
                )
            }
            BatchError::MissingDirectory(path) => {
                write!(f, "directory does not exist {:?}", path)
            }
            BatchError::Io { path, error } => {
                write!(f, "{} for path {:?}", error, path)
            }
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}
