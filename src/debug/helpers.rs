// src/debug/helpers.rs

//! Temporary file and directory helpers for testing.

use crate::common::FPath;
use crate::readers::helpers::path_to_fpath;

use std::fs::create_dir_all;
use std::fs::File;
use std::io::Write; // for `File.write_all`
use std::path::{Path, PathBuf};

use ::lazy_static::lazy_static;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile and TempDir instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-navmerge-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("NamedTempFile::new() return Err {}", err);
        }
    };
    match ntf.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// Create a temporary directory
pub fn create_temp_dir() -> TempDir {
    defñ!();
    match ::tempfile::Builder::new()
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempdir()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new().tempdir() return Err {}", err);
        }
    }
}

/// Testing helper function to write a `[u8]` to a file at `name`
/// relative to `dir`.
/// Will create leading directories in paths, e.g. `name` value `foo/bar`
/// creates directory `foo` and file `bar`.
/// Returns the full path of the new file.
pub fn create_file_bytes_name_in_dir(
    data: &[u8],
    name: &str,
    dir: &Path,
) -> FPath {
    let path_file: PathBuf = dir.join(name);
    if let Some(parent) = path_file.parent() {
        defo!("create_dir_all({:?})", parent);
        if let Err(err) = create_dir_all(parent) {
            panic!("create_dir_all({:?}) Error {:?}", parent, err);
        }
    }
    defo!("File::create({:?})", path_file);
    let mut file_ = match File::create(&path_file) {
        Ok(f) => f,
        Err(err) => panic!("File::create({:?}) Error {:?}", path_file, err),
    };
    if let Err(err) = file_.write_all(data) {
        panic!("write_all({:?}) Error {:?}", path_file, err);
    }

    path_to_fpath(&path_file)
}

/// Testing helper to create empty directories within the passed `dir`.
pub fn create_dirs_in_dir(
    dir: &Path,
    dirnames: &[&str],
) -> Vec<FPath> {
    let mut fpaths = Vec::<FPath>::with_capacity(dirnames.len());
    for name in dirnames.iter() {
        let path_ = dir.join(name);
        defo!("create_dir_all({:?})", path_);
        if let Err(err) = create_dir_all(&path_) {
            panic!("create_dir_all({:?}) Error {:?}", path_, err);
        }
        fpaths.push(path_to_fpath(&path_));
    }

    fpaths
}

/// Testing helper to read an entire file as bytes.
pub fn read_file_bytes(path: &Path) -> Vec<u8> {
    match std::fs::read(path) {
        Ok(val) => val,
        Err(err) => panic!("std::fs::read({:?}) Error {:?}", path, err),
    }
}
