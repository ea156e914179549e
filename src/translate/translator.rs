// src/translate/translator.rs

//! Implements a [`SentenceTranslator`], mapping each [`RawRecord`] to zero
//! or more [`TranslatedSentence`]s by [`SentenceKind`].
//!
//! | kind                 | output                                         |
//! |----------------------|------------------------------------------------|
//! | `Fix`                | the `$GPGGA` unchanged                         |
//! | `TrueHeading`        | the `$HEHDT` unchanged                         |
//! | `HeadingCorrection`  | `$HEHDT` from the `$PCHPR` heading             |
//! | `CompositeFixCourse` | `$GPVTG`, or `$GPGGA` and `$GPHDT`, per [`CompositeMode`] |
//!
//! A record that fails validation is [`TranslateResult::Skipped`].

use std::collections::BTreeMap;
use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::Count;
use crate::data::datetime::DateTimeU;
use crate::data::record::{RawRecord, SentenceKind};
use crate::data::sentence::{
    sentence_with_checksum,
    validate,
    ParsedSentence,
    SentenceError,
    TranslatedSentence,
    TranslatedSentences,
};
#[allow(unused_imports)]
use crate::debug::printers::de_wrn;

/// Kilometres per hour in one knot.
pub const KNOTS_TO_KMH: f64 = 1.852;

// A `$GPRMC` does not carry these `$GPGGA` fields.

/// satellites in use, `$GPGGA` field 7
pub const SYNTH_GGA_SATELLITES: &str = "08";
/// horizontal dilution of precision, `$GPGGA` field 8
pub const SYNTH_GGA_HDOP: &str = "1.0";
/// antenna altitude in metres, `$GPGGA` field 9
pub const SYNTH_GGA_ALTITUDE: &str = "0.0";
/// geoidal separation in metres, `$GPGGA` field 11
pub const SYNTH_GGA_GEOID_SEPARATION: &str = "0.0";

// `$GPRMC` field indexes
const RMC_TIME: usize = 1;
const RMC_STATUS: usize = 2;
const RMC_LATITUDE: usize = 3;
const RMC_LATITUDE_HEMISPHERE: usize = 4;
const RMC_LONGITUDE: usize = 5;
const RMC_LONGITUDE_HEMISPHERE: usize = 6;
const RMC_SPEED_KNOTS: usize = 7;
const RMC_COURSE: usize = 8;

// `$PCHPR` field index
const PCHPR_HEADING: usize = 1;

/// How a `CompositeFixCourse` (`$GPRMC`) record is translated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompositeMode {
    /// one `$GPVTG`; course-over-ground is both the true and the magnetic
    /// bearing
    #[default]
    Velocity,
    /// one `$GPGGA` with `SYNTH_GGA_*` defaults, then one `$GPHDT`;
    /// true heading is approximated by course-over-ground
    FixAndHeading,
}

impl fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeMode::Velocity => write!(f, "velocity"),
            CompositeMode::FixAndHeading => write!(f, "fix-and-heading"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslatorOptions {
    pub composite_mode: CompositeMode,
    /// speed conversion factor applied to `$GPRMC` speed-over-ground
    pub knots_to_kmh: f64,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        TranslatorOptions {
            composite_mode: CompositeMode::default(),
            knots_to_kmh: KNOTS_TO_KMH,
        }
    }
}

/// Result of [`SentenceTranslator::translate_record`].
#[derive(Debug, Eq, PartialEq)]
pub enum TranslateResult {
    /// one or more sentences, in output order
    Translated(TranslatedSentences),
    /// the record cannot be translated
    Skipped(SentenceError),
}

/// Per-session translation statistics.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummaryTranslator {
    /// records translated, per input kind
    pub translated: BTreeMap<SentenceKind, Count>,
    /// sentences created
    pub sentences_out: Count,
    /// every record skipped, with the reason
    pub skipped: Vec<(DateTimeU, SentenceKind, SentenceError)>,
}

impl SummaryTranslator {
    pub fn records_translated(&self) -> Count {
        self.translated.values().sum()
    }

    pub fn records_skipped(&self) -> Count {
        self.skipped.len() as Count
    }
}

/// Maps [`RawRecord`]s to [`TranslatedSentence`]s.
#[derive(Clone, Debug, Default)]
pub struct SentenceTranslator {
    options: TranslatorOptions,
}

impl SentenceTranslator {
    pub fn new(options: TranslatorOptions) -> SentenceTranslator {
        defñ!("({:?})", options);

        SentenceTranslator { options }
    }

    /// Translate one record.
    pub fn translate_record(
        &self,
        record: &RawRecord,
    ) -> TranslateResult {
        let parsed: ParsedSentence = match validate(&record.raw_text) {
            Ok(val) => val,
            Err(err) => return TranslateResult::Skipped(err),
        };
        let texts: Result<Vec<String>, SentenceError> = match record.kind {
            SentenceKind::Fix | SentenceKind::TrueHeading => {
                Ok(vec![record.raw_text.trim_end_matches(['\r', '\n']).to_string()])
            }
            SentenceKind::HeadingCorrection => self.heading_from_correction(&parsed).map(|text| vec![text]),
            SentenceKind::CompositeFixCourse => match self.options.composite_mode {
                CompositeMode::Velocity => self.velocity_from_composite(&parsed).map(|text| vec![text]),
                CompositeMode::FixAndHeading => self.fix_and_heading_from_composite(&parsed),
            },
        };
        match texts {
            Ok(texts) => TranslateResult::Translated(
                texts
                    .into_iter()
                    .map(|text| TranslatedSentence::new(text, record.timestamp))
                    .collect(),
            ),
            Err(err) => TranslateResult::Skipped(err),
        }
    }

    /// Translate `records` in order. Skipped records are recorded in the
    /// returned [`SummaryTranslator`].
    pub fn translate_records<'a, I>(
        &self,
        records: I,
    ) -> (TranslatedSentences, SummaryTranslator)
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        defn!();
        let mut sentences = TranslatedSentences::new();
        let mut summary = SummaryTranslator::default();
        for record in records {
            match self.translate_record(record) {
                TranslateResult::Translated(sentences_) => {
                    *summary
                        .translated
                        .entry(record.kind)
                        .or_insert(0) += 1;
                    summary.sentences_out += sentences_.len() as Count;
                    sentences.extend(sentences_);
                }
                TranslateResult::Skipped(reason) => {
                    de_wrn!("skipped {} at {}; {}", record.kind, record.timestamp, reason);
                    summary
                        .skipped
                        .push((record.timestamp, record.kind, reason));
                }
            }
        }
        defx!("return {} sentences, {} skipped", sentences.len(), summary.skipped.len());

        (sentences, summary)
    }

    /// `$PCHPR,<heading>,...` becomes `$HEHDT,<heading>,T*hh`.
    fn heading_from_correction(
        &self,
        parsed: &ParsedSentence,
    ) -> Result<String, SentenceError> {
        let (heading, _) = parsed.field_numeric(PCHPR_HEADING)?;

        Ok(sentence_with_checksum(&format!("HEHDT,{},T", heading)))
    }

    /// `$GPRMC` becomes
    /// `$GPVTG,<cog>,T,<cog>,M,<sog>,N,<kmh>,K,D*hh`.
    fn velocity_from_composite(
        &self,
        parsed: &ParsedSentence,
    ) -> Result<String, SentenceError> {
        let (speed, knots) = parsed.field_numeric(RMC_SPEED_KNOTS)?;
        let (course, _) = parsed.field_numeric(RMC_COURSE)?;
        let kmh: f64 = knots * self.options.knots_to_kmh;

        Ok(sentence_with_checksum(&format!(
            "GPVTG,{},T,{},M,{},N,{:.3},K,D",
            course, course, speed, kmh
        )))
    }

    /// `$GPRMC` becomes a `$GPGGA` then a `$GPHDT,<cog>,T*hh`.
    fn fix_and_heading_from_composite(
        &self,
        parsed: &ParsedSentence,
    ) -> Result<Vec<String>, SentenceError> {
        let time: &str = parsed.field(RMC_TIME)?;
        let latitude: &str = parsed.field(RMC_LATITUDE)?;
        let latitude_hemisphere: &str = parsed.field(RMC_LATITUDE_HEMISPHERE)?;
        let longitude: &str = parsed.field(RMC_LONGITUDE)?;
        let longitude_hemisphere: &str = parsed.field(RMC_LONGITUDE_HEMISPHERE)?;
        let quality: &str = match parsed.field_or_empty(RMC_STATUS) {
            "A" => "1",
            _ => "0",
        };
        let (course, _) = parsed.field_numeric(RMC_COURSE)?;
        let gga: String = sentence_with_checksum(&format!(
            "GPGGA,{},{},{},{},{},{},{},{},{},M,{},M,,",
            time,
            latitude,
            latitude_hemisphere,
            longitude,
            longitude_hemisphere,
            quality,
            SYNTH_GGA_SATELLITES,
            SYNTH_GGA_HDOP,
            SYNTH_GGA_ALTITUDE,
            SYNTH_GGA_GEOID_SEPARATION,
        ));
        let hdt: String = sentence_with_checksum(&format!("GPHDT,{},T", course));

        Ok(vec![gga, hdt])
    }
}
