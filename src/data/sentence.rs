// src/data/sentence.rs

//! NMEA 0183 sentence validation, checksums, and the
//! [`TranslatedSentence`] written to a positioning file.
//!
//! A sentence has the form `$<id>,<field>,<field>,...*<hh>` where `<hh>`
//! is the two hexadecimal digit XOR of every byte between `$` and `*`.
//! The `*<hh>` checksum is optional in received sentences and always
//! present in sentences created here.

use std::fmt;

use crate::data::datetime::DateTimeU;

/// Why a received sentence cannot be used.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SentenceError {
    /// does not begin with `'$'`
    NoStart,
    /// nothing between `'$'` and the first `','`
    NoId,
    /// the `*hh` checksum is not two hexadecimal digits
    ChecksumUnreadable(String),
    /// the `*hh` checksum does not match the sentence
    ChecksumMismatch {
        expected: u8,
        found: u8,
    },
    /// field at index is absent or empty
    MissingField(usize),
    /// field at index is not a number
    NotNumeric(usize, String),
}

impl fmt::Display for SentenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceError::NoStart => write!(f, "sentence does not begin with '$'"),
            SentenceError::NoId => write!(f, "sentence has no identifier"),
            SentenceError::ChecksumUnreadable(val) => write!(f, "unreadable checksum {:?}", val),
            SentenceError::ChecksumMismatch { expected, found } => {
                write!(f, "checksum mismatch; expected {:02X} found {:02X}", expected, found)
            }
            SentenceError::MissingField(index) => write!(f, "missing field {}", index),
            SentenceError::NotNumeric(index, val) => write!(f, "field {} is not numeric {:?}", index, val),
        }
    }
}

/// XOR checksum of `body`, the bytes between `'$'` and `'*'`.
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0u8, |acc, b| acc ^ b)
}

/// Create a complete sentence from `body` (without `'$'`), appending the
/// `*hh` checksum.
pub fn sentence_with_checksum(body: &str) -> String {
    format!("${}*{:02X}", body, checksum(body))
}

/// A validated sentence split into fields.
///
/// Field index `0` is the identifier, e.g. `"GPRMC"`, so indexes match
/// the field numbering of the NMEA 0183 standard.
#[derive(Debug, Eq, PartialEq)]
pub struct ParsedSentence<'a> {
    fields: Vec<&'a str>,
}

impl<'a> ParsedSentence<'a> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Return non-empty field at `index`.
    pub fn field(
        &self,
        index: usize,
    ) -> Result<&'a str, SentenceError> {
        match self.fields.get(index) {
            Some(val) if !val.is_empty() => Ok(*val),
            _ => Err(SentenceError::MissingField(index)),
        }
    }

    /// Return field at `index`, or `""` if absent.
    pub fn field_or_empty(
        &self,
        index: usize,
    ) -> &'a str {
        self.fields.get(index).copied().unwrap_or("")
    }

    /// Return non-empty field at `index` that must parse as a number.
    /// The returned text is the field as received, the number is only
    /// checked.
    pub fn field_numeric(
        &self,
        index: usize,
    ) -> Result<(&'a str, f64), SentenceError> {
        let val: &'a str = self.field(index)?;
        match val.trim().parse::<f64>() {
            Ok(num) if num.is_finite() => Ok((val, num)),
            _ => Err(SentenceError::NotNumeric(index, val.to_string())),
        }
    }
}

/// Validate `sentence` and split it into fields.
///
/// Trailing `'\r'` and `'\n'` are ignored. If a `*hh` checksum is present
/// it must match.
pub fn validate(sentence: &str) -> Result<ParsedSentence<'_>, SentenceError> {
    let sentence = sentence.trim_end_matches(['\r', '\n']);
    let rest: &str = match sentence.strip_prefix('$') {
        Some(val) => val,
        None => return Err(SentenceError::NoStart),
    };
    let body: &str = match rest.rsplit_once('*') {
        Some((body, checksum_hex)) => {
            if checksum_hex.len() != 2 {
                return Err(SentenceError::ChecksumUnreadable(checksum_hex.to_string()));
            }
            let found: u8 = match u8::from_str_radix(checksum_hex, 16) {
                Ok(val) => val,
                Err(_) => return Err(SentenceError::ChecksumUnreadable(checksum_hex.to_string())),
            };
            let expected: u8 = checksum(body);
            if expected != found {
                return Err(SentenceError::ChecksumMismatch { expected, found });
            }
            body
        }
        None => rest,
    };
    let fields: Vec<&str> = body.split(',').collect();
    if fields[0].is_empty() {
        return Err(SentenceError::NoId);
    }

    Ok(ParsedSentence { fields })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TranslatedSentence
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One complete sentence in the instrument's vocabulary with the datetime
/// of the log line it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TranslatedSentence {
    pub text: String,
    pub timestamp: DateTimeU,
}

impl TranslatedSentence {
    pub fn new(
        text: String,
        timestamp: DateTimeU,
    ) -> TranslatedSentence {
        TranslatedSentence { text, timestamp }
    }
}

pub type TranslatedSentences = Vec<TranslatedSentence>;
