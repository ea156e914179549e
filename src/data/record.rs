// src/data/record.rs

//! Implements [`SentenceKind`] and [`RawRecord`], one recognized sentence
//! from a raw navigation log.

use std::fmt;

use ::phf::phf_map;

use crate::data::datetime::DateTimeU;

/// Byte length of a sentence kind marker, e.g. `"$GPGGA"`.
pub const SENTENCE_MARKER_LEN: usize = 6;

/// The closed set of recognized sentence kinds. Log lines with any other
/// marker are dropped by the [`RawLogReader`].
///
/// [`RawLogReader`]: crate::readers::rawlogreader::RawLogReader
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SentenceKind {
    /// `$GPGGA` positional fix, already in the instrument's format
    Fix,
    /// `$GPRMC` position, time, course-over-ground, and speed-over-ground
    CompositeFixCourse,
    /// `$PCHPR` proprietary heading, pitch, roll
    HeadingCorrection,
    /// `$HEHDT` true heading, already in the instrument's format
    TrueHeading,
}

/// Map sentence marker to [`SentenceKind`].
static MAP_MARKER_TO_KIND: phf::Map<&'static str, SentenceKind> = phf_map! {
    "$GPGGA" => SentenceKind::Fix,
    "$GPRMC" => SentenceKind::CompositeFixCourse,
    "$PCHPR" => SentenceKind::HeadingCorrection,
    "$HEHDT" => SentenceKind::TrueHeading,
};

impl SentenceKind {
    /// All recognized kinds, in summary printing order.
    pub const ALL: [SentenceKind; 4] = [
        SentenceKind::Fix,
        SentenceKind::CompositeFixCourse,
        SentenceKind::HeadingCorrection,
        SentenceKind::TrueHeading,
    ];

    /// Return the `SentenceKind` for a marker, e.g. `"$GPGGA"`.
    pub fn from_marker(marker: &str) -> Option<SentenceKind> {
        MAP_MARKER_TO_KIND.get(marker).copied()
    }

    pub const fn marker(&self) -> &'static str {
        match self {
            SentenceKind::Fix => "$GPGGA",
            SentenceKind::CompositeFixCourse => "$GPRMC",
            SentenceKind::HeadingCorrection => "$PCHPR",
            SentenceKind::TrueHeading => "$HEHDT",
        }
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// One recognized sentence parsed from one line of a raw navigation log.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawRecord {
    /// the sentence only, starting at the kind marker, e.g.
    /// `"$GPGGA,120000.00,...*43"`
    pub raw_text: String,
    pub kind: SentenceKind,
    pub timestamp: DateTimeU,
    /// name of the [`LogFamily`] of the log that held this record
    ///
    /// [`LogFamily`]: crate::readers::rawlogreader::LogFamily
    pub source_family: &'static str,
}

impl RawRecord {
    pub fn new(
        raw_text: String,
        kind: SentenceKind,
        timestamp: DateTimeU,
        source_family: &'static str,
    ) -> RawRecord {
        RawRecord {
            raw_text,
            kind,
            timestamp,
            source_family,
        }
    }
}

pub type RawRecords = Vec<RawRecord>;
