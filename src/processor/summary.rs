// src/processor/summary.rs

//! Per-session and per-batch statistics, and CLI option `--summary`
//! printing.

use std::collections::BTreeMap;
use std::io::{Result, Write};

use crate::common::{Count, FPath};
use crate::data::datetime::DateTimeU;
use crate::data::record::SentenceKind;
use crate::readers::rawlogreader::SummaryRawLogReader;
use crate::translate::translator::SummaryTranslator;

/// How processing of one session ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionOutcome {
    /// path of the finished archive
    Ok(FPath),
    /// an unpack, write, pack, or rename failed; the message has the path
    ErrArchiveIo(String),
}

impl SessionOutcome {
    pub const fn is_ok(&self) -> bool {
        matches!(*self, SessionOutcome::Ok(_))
    }
}

/// Statistics of one processed session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SummarySession {
    pub name_stem: String,
    pub window_start: DateTimeU,
    pub window_end: DateTimeU,
    /// records of the record table within the session window
    pub records_in_window: Count,
    /// files unpacked from the session archive, `0` for a sibling folder
    pub files_unpacked: Count,
    /// lines written to the positioning file
    pub sentences_written: Count,
    pub translator: SummaryTranslator,
    pub outcome: SessionOutcome,
}

/// Statistics of one batch run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummaryBatch {
    pub log_readers: Vec<SummaryRawLogReader>,
    /// records in the record table, after deduplication
    pub records_table: Count,
    pub records_by_kind: BTreeMap<SentenceKind, Count>,
    pub table_range: Option<(DateTimeU, DateTimeU)>,
    pub sessions: Vec<SummarySession>,
}

impl SummaryBatch {
    pub fn sessions_failed(&self) -> Count {
        self.sessions
            .iter()
            .filter(|session| !session.outcome.is_ok())
            .count() as Count
    }

    /// Did every session finish?
    pub fn is_ok(&self) -> bool {
        self.sessions_failed() == 0
    }

    pub fn sentences_written(&self) -> Count {
        self.sessions
            .iter()
            .map(|session| session.sentences_written)
            .sum()
    }
}

const INDENT1: &str = "  ";
const INDENT2: &str = "    ";
const INDENT3: &str = "      ";

/// Print `summary` to `writer`.
pub fn print_summary<W: Write>(
    summary: &SummaryBatch,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "Raw logs:")?;
    for log in summary.log_readers.iter() {
        writeln!(writer, "{}{:?} ({})", INDENT1, log.path, log.family)?;
        writeln!(
            writer,
            "{}lines {}, records {}, unrecognized {}, malformed {}",
            INDENT2, log.lines, log.records, log.unrecognized, log.malformed
        )?;
    }
    writeln!(writer, "Record table:")?;
    writeln!(writer, "{}records      : {}", INDENT1, summary.records_table)?;
    for (kind, count) in summary.records_by_kind.iter() {
        writeln!(writer, "{}{:<13}: {}", INDENT1, kind.marker(), count)?;
    }
    match summary.table_range {
        Some((first, last)) => {
            writeln!(writer, "{}first        : {}", INDENT1, first.to_rfc3339())?;
            writeln!(writer, "{}last         : {}", INDENT1, last.to_rfc3339())?;
        }
        None => {
            writeln!(writer, "{}first        : None", INDENT1)?;
        }
    }
    writeln!(writer, "Sessions:")?;
    for session in summary.sessions.iter() {
        writeln!(writer, "{}{:?}", INDENT1, session.name_stem)?;
        writeln!(
            writer,
            "{}window       : ({}, {})",
            INDENT2,
            session.window_start.to_rfc3339(),
            session.window_end.to_rfc3339()
        )?;
        writeln!(writer, "{}records      : {}", INDENT2, session.records_in_window)?;
        writeln!(writer, "{}unpacked     : {}", INDENT2, session.files_unpacked)?;
        writeln!(writer, "{}sentences    : {}", INDENT2, session.sentences_written)?;
        for (kind, count) in session.translator.translated.iter() {
            writeln!(writer, "{}{:<13}: {}", INDENT2, kind.marker(), count)?;
        }
        writeln!(writer, "{}skipped      : {}", INDENT2, session.translator.records_skipped())?;
        for (dt, kind, reason) in session.translator.skipped.iter() {
            writeln!(writer, "{}{} {} {}", INDENT3, dt.to_rfc3339(), kind, reason)?;
        }
        match &session.outcome {
            SessionOutcome::Ok(path) => writeln!(writer, "{}archive      : {:?}", INDENT2, path)?,
            SessionOutcome::ErrArchiveIo(mesg) => writeln!(writer, "{}ERROR        : {}", INDENT2, mesg)?,
        }
    }
    writeln!(
        writer,
        "Sessions processed {}, failed {}, sentences written {}",
        summary.sessions.len(),
        summary.sessions_failed(),
        summary.sentences_written()
    )?;

    Ok(())
}
