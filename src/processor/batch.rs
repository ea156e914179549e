// src/processor/batch.rs

//! Drive one batch run: index the sessions, build the record table from
//! every raw navigation log, then for each session write the positioning
//! file and repack the session archive.
//!
//! Sessions are processed one after another. A failure of one session's
//! archive operations is recorded in that session's [`SummarySession`]
//! and the next session is attempted. Any other failure aborts the batch
//! with a [`BatchError`].

use std::fmt;
use std::io::{Error, ErrorKind};
use std::path::PathBuf;

use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{
    err_from_err_path,
    BatchError,
    Count,
    FPath,
    FPaths,
};
use crate::data::record::{RawRecord, RawRecords};
use crate::data::session::{Session, Sessions};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, e_err, e_wrn};
use crate::processor::summary::{
    SessionOutcome,
    SummaryBatch,
    SummarySession,
};
use crate::readers::correlator::records_in_window;
use crate::readers::helpers::path_to_fpath;
use crate::readers::rawlogreader::{
    find_log_files,
    LogFamily,
    RawLogReader,
    SummaryRawLogReader,
    LOG_FAMILY_NAV,
    LOG_FILENAME_REGEX_DEFAULT,
};
use crate::readers::recordtable::UnifiedRecordTable;
use crate::readers::sessionindexer::{
    find_session_archives,
    index_sessions,
    ExtractMode,
    SessionIndexConfig,
};
use crate::translate::translator::{
    SentenceTranslator,
    TranslatorOptions,
};
use crate::writers::archiverepacker::{
    repack_session,
    unpack_archive,
    ContainerFormat,
};
use crate::writers::gpsfilewriter::write_gps_file;

/// Directory of session archives under the batch root.
pub const SESSION_DIR_NAME_DEFAULT: &str = "adcp";

/// Directory of raw navigation logs under the batch root.
pub const LOG_DIR_NAME_DEFAULT: &str = "pcs";

/// One directory of raw navigation logs of one [`LogFamily`].
#[derive(Clone, Debug)]
pub struct LogSource {
    /// directory name under the batch root
    pub dir_name: String,
    pub family: &'static LogFamily,
    /// only files with a matching file name are read
    pub name_pattern: Regex,
}

impl LogSource {
    pub fn new(
        dir_name: String,
        family: &'static LogFamily,
        name_pattern: Regex,
    ) -> LogSource {
        LogSource {
            dir_name,
            family,
            name_pattern,
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} /{}/", self.dir_name, self.family, self.name_pattern.as_str())
    }
}

/// Every setting of a batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// batch root directory, holds the session, output, and log
    /// directories
    pub root: PathBuf,
    pub session_dir_name: String,
    pub log_sources: Vec<LogSource>,
    pub session_index: SessionIndexConfig,
    pub container_format: ContainerFormat,
    pub translator_options: TranslatorOptions,
}

impl BatchConfig {
    /// Default settings for batch root `root`.
    pub fn new(root: PathBuf) -> BatchConfig {
        BatchConfig {
            root,
            session_dir_name: String::from(SESSION_DIR_NAME_DEFAULT),
            log_sources: vec![LogSource::new(
                String::from(LOG_DIR_NAME_DEFAULT),
                &LOG_FAMILY_NAV,
                LOG_FILENAME_REGEX_DEFAULT.clone(),
            )],
            session_index: SessionIndexConfig::default(),
            container_format: ContainerFormat::default(),
            translator_options: TranslatorOptions::default(),
        }
    }

    pub fn session_dir(&self) -> PathBuf {
        self.root.join(&self.session_dir_name)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.session_index.output_dir_name)
    }

    pub fn log_dir(
        &self,
        source: &LogSource,
    ) -> PathBuf {
        self.root.join(&source.dir_name)
    }
}

/// Every directory named by `config` must exist.
fn check_directories(config: &BatchConfig) -> Result<(), BatchError> {
    let mut dirs: Vec<PathBuf> = vec![config.session_dir(), config.output_dir()];
    dirs.extend(config.log_sources.iter().map(|source| config.log_dir(source)));
    for dir in dirs.iter() {
        if !dir.is_dir() {
            defñ!("missing {:?}", dir);
            return Err(BatchError::MissingDirectory(path_to_fpath(dir)));
        }
    }

    Ok(())
}

/// Read every log file of every [`LogSource`] and build the record
/// table.
///
/// Records of sources sharing a [`LogFamily`] are deduplicated together.
pub fn build_record_table(
    config: &BatchConfig,
) -> Result<(UnifiedRecordTable, Vec<SummaryRawLogReader>), BatchError> {
    defn!("({} sources)", config.log_sources.len());
    // family name, records; in order of first appearance
    let mut families: Vec<(&'static str, RawRecords)> = Vec::new();
    let mut summaries: Vec<SummaryRawLogReader> = Vec::new();
    for source in config.log_sources.iter() {
        let dir: PathBuf = config.log_dir(source);
        let paths: FPaths = match find_log_files(&dir, &source.name_pattern) {
            Ok(val) => val,
            Err(error) => {
                defx!("find_log_files Error {:?}", error);
                return Err(BatchError::Io {
                    path: path_to_fpath(&dir),
                    error,
                });
            }
        };
        if paths.is_empty() {
            e_wrn!("no log files matching {:?} in {:?}", source.name_pattern.as_str(), dir);
        }
        let index: usize = match families
            .iter()
            .position(|(name, _)| *name == source.family.name)
        {
            Some(val) => val,
            None => {
                families.push((source.family.name, RawRecords::new()));
                families.len() - 1
            }
        };
        for fpath in paths.into_iter() {
            let mut reader = RawLogReader::new(fpath, source.family);
            let mut records: RawRecords = match reader.read_records() {
                Ok(val) => val,
                Err(error) => {
                    defx!("read_records Error {:?}", error);
                    return Err(BatchError::Io {
                        path: reader.path().clone(),
                        error,
                    });
                }
            };
            families[index].1.append(&mut records);
            summaries.push(reader.summary());
        }
    }
    let table = UnifiedRecordTable::from_families(
        families
            .into_iter()
            .map(|(_, records)| records)
            .collect(),
    );
    defx!("return table of {} records", table.len());

    Ok((table, summaries))
}

/// Fill the working folder of `session`. Returns the count of files
/// unpacked.
fn prepare_working_folder(
    session: &Session,
    config: &BatchConfig,
) -> std::io::Result<Count> {
    match config.session_index.extract_mode {
        ExtractMode::Unpack => unpack_archive(
            &session.archive_path,
            &session.extracted_folder_path,
            config.container_format,
        ),
        ExtractMode::Sibling => {
            if session.extracted_folder_path.is_dir() {
                Ok(0)
            } else {
                let err = Error::new(ErrorKind::NotFound, "working folder does not exist");
                Err(err_from_err_path(
                    &err,
                    &path_to_fpath(&session.extracted_folder_path),
                    None,
                ))
            }
        }
    }
}

/// Process one session against the record `table`.
///
/// Archive failures are returned in the [`SummarySession`] `outcome`.
pub fn process_session(
    session: &Session,
    table: &UnifiedRecordTable,
    translator: &SentenceTranslator,
    config: &BatchConfig,
) -> SummarySession {
    defn!("({})", session);
    let records: &[RawRecord] = records_in_window(table, session);
    let (sentences, summary_translator) = translator.translate_records(records);
    let mut summary = SummarySession {
        name_stem: session.name_stem.clone(),
        window_start: session.window_start,
        window_end: session.window_end,
        records_in_window: records.len() as Count,
        files_unpacked: 0,
        sentences_written: 0,
        translator: summary_translator,
        outcome: SessionOutcome::ErrArchiveIo(String::new()),
    };
    if sentences.is_empty() {
        e_wrn!("no positioning data within the window of {:?}", session.name_stem);
    }

    let result: std::io::Result<FPath> = prepare_working_folder(session, config)
        .and_then(|files_unpacked| {
            summary.files_unpacked = files_unpacked;
            write_gps_file(&session.extracted_folder_path, &session.name_stem, &sentences)
        })
        .and_then(|(_fpath_gps, count)| {
            defo!("wrote {} lines to {:?}", count, _fpath_gps);
            summary.sentences_written = count;
            repack_session(session, config.container_format, &config.session_index.extension)
        });
    summary.outcome = match result {
        Ok(fpath) => SessionOutcome::Ok(fpath),
        Err(err) => {
            e_err!("session {:?} failed; {}", session.name_stem, err);
            SessionOutcome::ErrArchiveIo(err.to_string())
        }
    };
    defx!("{:?}", summary.outcome);

    summary
}

/// Run the entire batch described by `config`.
pub fn run_batch(config: &BatchConfig) -> Result<SummaryBatch, BatchError> {
    defn!("({:?})", config.root);
    check_directories(config)?;

    let session_dir: PathBuf = config.session_dir();
    let paths: FPaths = match find_session_archives(&session_dir, &config.session_index.extension) {
        Ok(val) => val,
        Err(error) => {
            return Err(BatchError::Io {
                path: path_to_fpath(&session_dir),
                error,
            });
        }
    };
    if paths.is_empty() {
        e_wrn!("no session archives {:?} in {:?}", config.session_index.extension, session_dir);
    }
    let sessions: Sessions = index_sessions(&paths, &config.session_index)?;

    let (table, log_readers) = build_record_table(config)?;
    let translator = SentenceTranslator::new(config.translator_options);
    let mut summary = SummaryBatch {
        log_readers,
        records_table: table.len() as Count,
        records_by_kind: table.count_by_kind(),
        table_range: table.datetime_range(),
        sessions: Vec::with_capacity(sessions.len()),
    };
    for session in sessions.iter() {
        summary
            .sessions
            .push(process_session(session, &table, &translator, config));
    }
    defx!("return {} sessions, {} failed", summary.sessions.len(), summary.sessions_failed());

    Ok(summary)
}
