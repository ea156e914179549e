// src/readers/helpers.rs

//! Miscellaneous path helper functions for _Readers_ and _Writers_.

use std::path::{Path, PathBuf};

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::FPath;

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Remove `suffix` from the end of the file name of `path`.
///
/// Returns `None` if the file name does not end with `suffix` or if
/// removing it would leave an empty file name.
pub fn path_strip_suffix(
    path: &Path,
    suffix: &str,
) -> Option<PathBuf> {
    let file_name: String = path.file_name()?.to_string_lossy().to_string();
    let stem: &str = file_name.strip_suffix(suffix)?;
    if stem.is_empty() {
        defñ!("({:?}, {:?}) empty stem", path, suffix);
        return None;
    }

    Some(path.with_file_name(stem))
}

/// Append `suffix` to the file name of `path`, e.g. `/a/b.zip` and `_FILES`
/// becomes `/a/b.zip_FILES`.
pub fn path_append_suffix(
    path: &Path,
    suffix: &str,
) -> PathBuf {
    let mut os_string = path.as_os_str().to_os_string();
    os_string.push(suffix);

    PathBuf::from(os_string)
}

/// Does the file name of `path` end with `suffix`?
pub fn filename_ends_with(
    path: &Path,
    suffix: &str,
) -> bool {
    match path.file_name() {
        Some(name) => name.to_string_lossy().ends_with(suffix),
        None => false,
    }
}
