// src/readers/sessionindexer.rs

//! Find instrument session archives and derive each [`Session`]'s window
//! and paths from the archive file names.
//!
//! The instrument names each session archive with the session start
//! datetime at a fixed position near the end of the name, e.g.
//! `S100889A001_Survey_20210615_120000_01.SigVM`. Sorting the archive
//! paths lexicographically therefore sorts the sessions chronologically;
//! [`index_sessions`] checks that.

use std::fmt;
use std::io::Result;
use std::path::{Path, PathBuf};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::walkdir::WalkDir;

use crate::common::{
    err_from_err_path_result,
    BatchError,
    FPath,
    FPaths,
    FILES_FOLDER_SUFFIX,
};
use crate::data::datetime::{
    window_last_session,
    ymdhms,
    DateTimeU,
    Duration,
};
use crate::data::session::{Session, Sessions};
use crate::readers::helpers::{
    filename_ends_with,
    path_append_suffix,
    path_strip_suffix,
    path_to_fpath,
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SessionNameLayout
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Position of one run of digits within a session archive path, counted
/// in bytes back from the end of the path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NameField {
    pub offset_from_end: usize,
    pub length: usize,
}

impl NameField {
    pub const fn new(
        offset_from_end: usize,
        length: usize,
    ) -> NameField {
        NameField {
            offset_from_end,
            length,
        }
    }
}

/// Positions of the session start datetime components within a session
/// archive path.
///
/// A `year` field of length `2` is a year of the 2000s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionNameLayout {
    pub year: NameField,
    pub month: NameField,
    pub day: NameField,
    pub hour: NameField,
    pub minute: NameField,
    pub second: NameField,
}

/// Layout of `..._YYYYMMDD_HHMMSS_NN.SigVM`.
pub const SESSION_NAME_LAYOUT_DEFAULT: SessionNameLayout = SessionNameLayout {
    year: NameField::new(24, 4),
    month: NameField::new(20, 2),
    day: NameField::new(18, 2),
    hour: NameField::new(15, 2),
    minute: NameField::new(13, 2),
    second: NameField::new(11, 2),
};

/// The instrument's native session archive extension.
pub const INSTRUMENT_EXTENSION_DEFAULT: &str = ".SigVM";

/// Directory of finished archives, a sibling of the session directory.
pub const OUTPUT_DIR_NAME_DEFAULT: &str = "adcp_out";

/// How the working folder of a session is found.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExtractMode {
    /// unpack the session archive into a folder named like the archive
    /// without the extension
    Unpack,
    /// the archive was unpacked beforehand to a sibling folder named like
    /// the archive with `_FILES` appended, as the instrument software does
    #[default]
    Sibling,
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractMode::Unpack => write!(f, "unpack"),
            ExtractMode::Sibling => write!(f, "sibling"),
        }
    }
}

/// Rules to derive a [`Session`] from a session archive path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionIndexConfig {
    pub layout: SessionNameLayout,
    /// session archive extension, e.g. `".SigVM"`
    pub extension: String,
    /// name of the directory replacing the archive's containing directory
    /// in the output archive path
    pub output_dir_name: String,
    pub extract_mode: ExtractMode,
    /// window length of the last session, usually
    /// [`window_last_session`]
    ///
    /// [`window_last_session`]: crate::data::datetime::window_last_session
    pub last_window: Duration,
}

impl Default for SessionIndexConfig {
    fn default() -> Self {
        SessionIndexConfig {
            layout: SESSION_NAME_LAYOUT_DEFAULT,
            extension: String::from(INSTRUMENT_EXTENSION_DEFAULT),
            output_dir_name: String::from(OUTPUT_DIR_NAME_DEFAULT),
            extract_mode: ExtractMode::default(),
            last_window: window_last_session(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// session start datetime
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Return the value of the run of digits at `field` of `path`.
fn name_field_value(
    path: &str,
    field: &NameField,
    field_name: &str,
) -> std::result::Result<u32, String> {
    if field.length == 0 || field.length > field.offset_from_end || field.offset_from_end > path.len() {
        return Err(format!("path too short for {} at offset -{}", field_name, field.offset_from_end));
    }
    let beg: usize = path.len() - field.offset_from_end;
    let digits: &str = match path.get(beg..beg + field.length) {
        Some(val) => val,
        None => {
            return Err(format!("{} at offset -{} is not ASCII", field_name, field.offset_from_end));
        }
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{} {:?} is not digits", field_name, digits));
    }
    match digits.parse::<u32>() {
        Ok(val) => Ok(val),
        Err(err) => Err(format!("{} {:?}; {}", field_name, digits, err)),
    }
}

/// Extract the session start datetime from a session archive `path`
/// according to `layout`.
pub fn session_start_from_path(
    path: &FPath,
    layout: &SessionNameLayout,
) -> std::result::Result<DateTimeU, BatchError> {
    defn!("({:?})", path);
    let malformed = |reason: String| -> BatchError {
        BatchError::MalformedSessionName {
            path: path.clone(),
            reason,
        }
    };
    let mut year: u32 = name_field_value(path, &layout.year, "year").map_err(malformed)?;
    if layout.year.length == 2 {
        year += 2000;
    }
    let month: u32 = name_field_value(path, &layout.month, "month").map_err(malformed)?;
    let day: u32 = name_field_value(path, &layout.day, "day").map_err(malformed)?;
    let hour: u32 = name_field_value(path, &layout.hour, "hour").map_err(malformed)?;
    let minute: u32 = name_field_value(path, &layout.minute, "minute").map_err(malformed)?;
    let second: u32 = name_field_value(path, &layout.second, "second").map_err(malformed)?;
    let dt: DateTimeU = match ymdhms(year as i32, month, day, hour, minute, second) {
        Some(val) => val,
        None => {
            defx!("invalid datetime");
            return Err(malformed(format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02} is not a valid datetime",
                year, month, day, hour, minute, second
            )));
        }
    };
    defx!("return {:?}", dt);

    Ok(dt)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// session paths
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Return the output archive path, without extension, for a session
/// archive `path`: the containing directory is replaced by
/// `output_dir_name` and the file name loses its `extension`,
/// e.g. `/data/adcp/S_20210615_120000_01.SigVM` becomes
/// `/data/adcp_out/S_20210615_120000_01`.
pub fn output_archive_path(
    path: &Path,
    name_stem: &str,
    output_dir_name: &str,
) -> PathBuf {
    let grandparent: &Path = match path.parent().and_then(|parent| parent.parent()) {
        Some(val) => val,
        None => Path::new(""),
    };

    grandparent
        .join(output_dir_name)
        .join(name_stem)
}

/// Return the working folder path for a session archive `path`.
pub fn extracted_folder_path(
    path: &Path,
    name_stem: &str,
    extract_mode: ExtractMode,
) -> PathBuf {
    match extract_mode {
        ExtractMode::Unpack => path.with_file_name(name_stem),
        ExtractMode::Sibling => path_append_suffix(path, FILES_FOLDER_SUFFIX),
    }
}

/// Recursively find session archives under `dir`, i.e. files with a name
/// ending in `extension`. Returned paths are sorted.
pub fn find_session_archives(
    dir: &Path,
    extension: &str,
) -> Result<FPaths> {
    defn!("({:?}, {:?})", dir, extension);
    if let Err(err) = std::fs::metadata(dir) {
        defx!("metadata({:?}) Error {:?}", dir, err);
        return err_from_err_path_result::<FPaths>(&err, &path_to_fpath(dir), Some("session directory"));
    }
    let mut paths: FPaths = FPaths::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(val) => val,
            Err(_err) => {
                defo!("Err({:?})", _err);
                continue;
            }
        };
        if entry.file_type().is_file() && filename_ends_with(entry.path(), extension) {
            paths.push(path_to_fpath(entry.path()));
        }
    }
    paths.sort();
    defx!("return {} paths", paths.len());

    Ok(paths)
}

/// Create a [`Session`] for each of the sorted session archive `paths`.
///
/// The window of each session ends where the window of the next session
/// begins. The last session window is `config.last_window` long.
///
/// Fails if any path does not yield a start datetime, or if start
/// datetimes are not strictly increasing.
pub fn index_sessions(
    paths: &[FPath],
    config: &SessionIndexConfig,
) -> std::result::Result<Sessions, BatchError> {
    defn!("({} paths)", paths.len());
    let mut starts: Vec<DateTimeU> = Vec::with_capacity(paths.len());
    for (i, fpath) in paths.iter().enumerate() {
        let start: DateTimeU = session_start_from_path(fpath, &config.layout)?;
        if i > 0 && start <= starts[i - 1] {
            defx!("session order error at {:?}", fpath);
            return Err(BatchError::SessionOrder {
                path_prev: paths[i - 1].clone(),
                path: fpath.clone(),
            });
        }
        starts.push(start);
    }

    let mut sessions: Sessions = Sessions::with_capacity(paths.len());
    for (i, fpath) in paths.iter().enumerate() {
        let archive_path: PathBuf = PathBuf::from(fpath);
        let name_stem: String = match path_strip_suffix(&archive_path, &config.extension) {
            Some(val) => match val.file_name() {
                Some(name) => name.to_string_lossy().to_string(),
                None => String::new(),
            },
            None => String::new(),
        };
        if name_stem.is_empty() {
            return Err(BatchError::MalformedSessionName {
                path: fpath.clone(),
                reason: format!("file name does not end with {:?}", config.extension),
            });
        }
        let window_start: DateTimeU = starts[i];
        let window_end: DateTimeU = match starts.get(i + 1) {
            Some(next) => *next,
            None => window_start + config.last_window,
        };
        let session = Session {
            extracted_folder_path: extracted_folder_path(&archive_path, &name_stem, config.extract_mode),
            output_archive_path: output_archive_path(&archive_path, &name_stem, &config.output_dir_name),
            archive_path,
            name_stem,
            window_start,
            window_end,
        };
        defo!("{}", session);
        sessions.push(session);
    }
    defx!("return {} sessions", sessions.len());

    Ok(sessions)
}
