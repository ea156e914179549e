// src/readers/rawlogreader.rs

//! Implements a [`RawLogReader`], the driver for deriving [`RawRecord`]s
//! from one raw navigation log file, and the [`LogFamily`] field layout
//! descriptors.
//!
//! A raw navigation log is line-oriented with no header. Each line holds
//! a logger-specific prefix with a datetime, followed by one NMEA
//! sentence. The datetime and the sentence are at fixed byte offsets that
//! differ per logger "family".
//!
//! [`RawRecord`]: crate::data::record::RawRecord

use std::fmt;
use std::io::{BufRead, BufReader, Result};
use std::path::Path;

use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::walkdir::WalkDir;

use crate::common::{
    err_from_err_path_result,
    Count,
    FPath,
    FPaths,
    File,
    FileOpenOptions,
};
use crate::data::datetime::{
    datetime_parse_from_str_utc,
    DateTimePattern_str,
    DateTimeU,
};
use crate::data::record::{
    RawRecord,
    RawRecords,
    SentenceKind,
    SENTENCE_MARKER_LEN,
};
#[allow(unused_imports)]
use crate::debug::printers::{de_wrn, e_wrn};
use crate::readers::helpers::path_to_fpath;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogFamily
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Declarative field layout of the lines of one family of raw navigation
/// logs. All offsets are byte offsets from the beginning of the line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LogFamily {
    pub name: &'static str,
    pub kind_offset: usize,
    pub kind_length: usize,
    pub timestamp_offset: usize,
    pub timestamp_length: usize,
    pub timestamp_format: &'static DateTimePattern_str,
    /// the sentence begins here and continues to the end of the line
    pub payload_offset: usize,
}

/// Navigation PC logger, e.g.
///
/// ```text
/// 210615,12:00:00;$GPGGA,120000.00,5030.1234,N,00405.4321,W,1,08,1.0,0.0,M,0.0,M,,*43
/// ```
pub const LOG_FAMILY_NAV: LogFamily = LogFamily {
    name: "nav",
    kind_offset: 16,
    kind_length: SENTENCE_MARKER_LEN,
    timestamp_offset: 0,
    timestamp_length: 15,
    timestamp_format: "%y%m%d,%H:%M:%S",
    payload_offset: 16,
};

/// Heading sensor logger, e.g.
///
/// ```text
/// 2021/06/15 12:00:00.250 [GYRO01] $PCHPR,271.40,1.20,-0.35
/// ```
pub const LOG_FAMILY_HEADING: LogFamily = LogFamily {
    name: "heading",
    kind_offset: 33,
    kind_length: SENTENCE_MARKER_LEN,
    timestamp_offset: 0,
    timestamp_length: 23,
    timestamp_format: "%Y/%m/%d %H:%M:%S%.3f",
    payload_offset: 33,
};

/// All known log families.
pub const LOG_FAMILIES: [&LogFamily; 2] = [&LOG_FAMILY_NAV, &LOG_FAMILY_HEADING];

/// Return the known [`LogFamily`] named `name`.
pub fn log_family_from_name(name: &str) -> Option<&'static LogFamily> {
    LOG_FAMILIES
        .iter()
        .find(|family| family.name == name)
        .copied()
}

impl fmt::Display for LogFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Result of [`parse_line`].
#[derive(Debug, Eq, PartialEq)]
pub enum ParseLineResult {
    /// a recognized sentence kind with a good datetime
    Record(RawRecord),
    /// a sentence kind not of interest, or a line too short to hold a kind
    /// marker; expected, most lines of a raw log are this
    Unrecognized,
    /// a recognized sentence kind but the line is unusable
    Malformed(String),
}

/// Line terminators and the trailing field delimiter, removed before
/// field extraction.
const LINE_TRIM: [char; 3] = ['\r', '\n', ';'];

/// Parse one line of a raw navigation log of `family`.
///
/// Extraction is by byte offset. Offsets that do not fall on a `char`
/// boundary are treated like offsets beyond the end of the line.
pub fn parse_line(
    line: &str,
    family: &LogFamily,
) -> ParseLineResult {
    let line: &str = line.trim_end_matches(LINE_TRIM);
    let marker: &str = match line.get(family.kind_offset..family.kind_offset + family.kind_length) {
        Some(val) => val,
        None => return ParseLineResult::Unrecognized,
    };
    let kind: SentenceKind = match SentenceKind::from_marker(marker) {
        Some(val) => val,
        None => return ParseLineResult::Unrecognized,
    };
    let ts_str: &str = match line.get(family.timestamp_offset..family.timestamp_offset + family.timestamp_length) {
        Some(val) => val,
        None => {
            return ParseLineResult::Malformed(format!("line too short for datetime, {:?}", line));
        }
    };
    let timestamp: DateTimeU = match datetime_parse_from_str_utc(ts_str, family.timestamp_format) {
        Some(val) => val,
        None => {
            return ParseLineResult::Malformed(format!(
                "datetime {:?} does not match pattern {:?}",
                ts_str, family.timestamp_format
            ));
        }
    };
    let payload: &str = match line.get(family.payload_offset..) {
        Some(val) if !val.is_empty() => val,
        _ => {
            return ParseLineResult::Malformed(format!("no sentence at offset {}", family.payload_offset));
        }
    };

    ParseLineResult::Record(RawRecord::new(payload.to_string(), kind, timestamp, family.name))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RawLogReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Summary statistics of one [`RawLogReader`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummaryRawLogReader {
    pub path: FPath,
    pub family: &'static str,
    pub lines: Count,
    pub records: Count,
    pub unrecognized: Count,
    pub malformed: Count,
}

/// A `RawLogReader` reads one raw navigation log file of a [`LogFamily`]
/// and derives [`RawRecord`]s from it.
///
/// The whole file is parsed by one call to [`read_records`]; it is not
/// restartable mid-file.
///
/// [`read_records`]: RawLogReader::read_records
pub struct RawLogReader {
    path: FPath,
    family: &'static LogFamily,
    lines: Count,
    records: Count,
    unrecognized: Count,
    malformed: Count,
}

impl fmt::Debug for RawLogReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawLogReader")
            .field("path", &self.path)
            .field("family", &self.family.name)
            .field("lines", &self.lines)
            .field("records", &self.records)
            .finish()
    }
}

impl RawLogReader {
    pub fn new(
        path: FPath,
        family: &'static LogFamily,
    ) -> RawLogReader {
        defñ!("({:?}, {:?})", path, family.name);

        RawLogReader {
            path,
            family,
            lines: 0,
            records: 0,
            unrecognized: 0,
            malformed: 0,
        }
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }

    /// Read the entire file, return every recognized [`RawRecord`] in file
    /// order.
    ///
    /// Unrecognized lines are dropped silently. Malformed lines, including
    /// lines that are not UTF-8, are dropped with a debug warning and
    /// counted in the [`SummaryRawLogReader`].
    pub fn read_records(&mut self) -> Result<RawRecords> {
        defn!("({:?})", self.path);
        let mut open_options = FileOpenOptions::new();
        let file: File = match open_options
            .read(true)
            .open(&self.path)
        {
            Ok(val) => val,
            Err(err) => {
                defx!("open({:?}) Error, return {:?}", self.path, err);
                return err_from_err_path_result::<RawRecords>(&err, &self.path, Some("open failed"));
            }
        };
        let mut reader = BufReader::new(file);
        let mut records: RawRecords = RawRecords::new();
        let mut buf: Vec<u8> = Vec::with_capacity(256);
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    defx!("read_until Error, return {:?}", err);
                    return err_from_err_path_result::<RawRecords>(&err, &self.path, Some("read failed"));
                }
            }
            self.lines += 1;
            let line: &str = match std::str::from_utf8(&buf) {
                Ok(val) => val,
                Err(_err) => {
                    de_wrn!("line {} of {:?} is not UTF-8; {}", self.lines, self.path, _err);
                    self.malformed += 1;
                    continue;
                }
            };
            match parse_line(line, self.family) {
                ParseLineResult::Record(record) => {
                    self.records += 1;
                    records.push(record);
                }
                ParseLineResult::Unrecognized => {
                    self.unrecognized += 1;
                }
                ParseLineResult::Malformed(_reason) => {
                    de_wrn!("line {} of {:?} skipped; {}", self.lines, self.path, _reason);
                    self.malformed += 1;
                }
            }
        }
        if self.malformed != 0 {
            e_wrn!("{} malformed lines skipped in {:?}", self.malformed, self.path);
        }
        defx!("return {} records", records.len());

        Ok(records)
    }

    pub fn summary(&self) -> SummaryRawLogReader {
        SummaryRawLogReader {
            path: self.path.clone(),
            family: self.family.name,
            lines: self.lines,
            records: self.records,
            unrecognized: self.unrecognized,
            malformed: self.malformed,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// log file discovery
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Default regular expression of raw navigation log file names; the
/// navigation PC names its data files `<vehicle>_D_<date>`.
pub const LOG_FILENAME_PATTERN_DEFAULT: &str = "_D_";

lazy_static! {
    /// Compiled [`LOG_FILENAME_PATTERN_DEFAULT`].
    pub static ref LOG_FILENAME_REGEX_DEFAULT: Regex = Regex::new(LOG_FILENAME_PATTERN_DEFAULT).unwrap();
}

/// Recursively find files under `dir` with a file name matching
/// `name_pattern`. Returned paths are sorted.
///
/// Entries that cannot be read are skipped.
pub fn find_log_files(
    dir: &Path,
    name_pattern: &Regex,
) -> Result<FPaths> {
    defn!("({:?}, {:?})", dir, name_pattern.as_str());
    if let Err(err) = std::fs::metadata(dir) {
        defx!("metadata({:?}) Error {:?}", dir, err);
        return err_from_err_path_result::<FPaths>(&err, &path_to_fpath(dir), Some("log directory"));
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
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if name_pattern.is_match(&file_name) {
            defo!("match {:?}", entry.path());
            paths.push(path_to_fpath(entry.path()));
        }
    }
    paths.sort();
    defx!("return {} paths", paths.len());

    Ok(paths)
}
