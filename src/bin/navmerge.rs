// src/bin/navmerge.rs

//! Driver program _navmerge_ drives the [_navmergelib_].
//!
//! Processes user-passed command-line arguments into a [`BatchConfig`],
//! then runs one batch with [`run_batch`].
//!
//! If passed CLI option `--summary`, prints a [`SummaryBatch`] to stderr
//! after the batch.
//!
//! Exits with failure if the batch could not run or if any session
//! failed.
//!
//! [_navmergelib_]: navmergelib
//! [`BatchConfig`]: navmergelib::processor::batch::BatchConfig
//! [`run_batch`]: navmergelib::processor::batch::run_batch
//! [`SummaryBatch`]: navmergelib::processor::summary::SummaryBatch

#![allow(non_camel_case_types)]

use std::path::PathBuf;
use std::process::ExitCode;

use ::anyhow::{Context, Result};
use ::clap::{
    Parser,
    ValueEnum,
};
use ::const_format::concatcp;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
    stack::stack_offset_set,
};

use ::navmergelib::debug::printers::{e_err, e_wrn};
use ::navmergelib::processor::batch::{
    run_batch,
    BatchConfig,
    LogSource,
    LOG_DIR_NAME_DEFAULT,
    SESSION_DIR_NAME_DEFAULT,
};
use ::navmergelib::processor::summary::{print_summary, SummaryBatch};
use ::navmergelib::readers::rawlogreader::{
    log_family_from_name,
    LogFamily,
    LOG_FAMILY_NAV,
    LOG_FILENAME_PATTERN_DEFAULT,
};
use ::navmergelib::readers::sessionindexer::{
    ExtractMode,
    INSTRUMENT_EXTENSION_DEFAULT,
    OUTPUT_DIR_NAME_DEFAULT,
};
use ::navmergelib::translate::translator::{
    CompositeMode,
    TranslatorOptions,
    KNOTS_TO_KMH,
};
use ::navmergelib::writers::archiverepacker::ContainerFormat;

/// Separates the directory, the family and the file name pattern of
/// `--log-dir`.
const CLI_LOG_DIR_SEP: char = ':';

/// A parsed `--log-dir` argument.
#[derive(Clone, Debug)]
struct CLI_Log_Dir {
    dir: String,
    family: &'static LogFamily,
    /// overrides `--log-pattern`
    name_pattern: Option<Regex>,
}

/// CLI enum that maps to [`CompositeMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CLI_Composite_Mode {
    velocity,
    fix_and_heading,
}

/// CLI enum that maps to [`ExtractMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CLI_Extract_Mode {
    unpack,
    sibling,
}

/// CLI enum that maps to [`ContainerFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CLI_Container {
    zip,
    tar,
    tar_gz,
}

#[cfg(debug_assertions)]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "\nDEBUG BUILD";
#[cfg(not(debug_assertions))]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "";

/// `--help` _afterword_ message.
const CLI_HELP_AFTER: &str = concatcp!(
    "\
The batch ROOT directory holds:
    ROOT/", SESSION_DIR_NAME_DEFAULT, "/      session archives, e.g. S100889A001_Survey_20210615_120000_01",
    INSTRUMENT_EXTENSION_DEFAULT, "
    ROOT/", LOG_DIR_NAME_DEFAULT, "/       raw navigation logs, file names matching \"", LOG_FILENAME_PATTERN_DEFAULT, "\"
    ROOT/", OUTPUT_DIR_NAME_DEFAULT, "/  finished session archives, must exist

Each finished archive holds the session archive files plus a positioning file
<session>.gps of the navigation sentences logged during the session.
A session lasts until the next session starts. The last session lasts 24 hours.

Log families:
    nav      \"210615,12:00:00;$GPGGA,...\"
    heading  \"2021/06/15 12:00:00.250 [GYRO01] $PCHPR,...\"",
    CLI_HELP_AFTER_NOTE_DEBUG,
);

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "navmerge",
    // write expanded information for the `--version` output
    version = concatcp!(
        "\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Batch root directory.
    #[clap(
        required = true,
        verbatim_doc_comment,
    )]
    root: PathBuf,

    /// Directory of session archives, relative to ROOT.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value = SESSION_DIR_NAME_DEFAULT,
    )]
    session_dir: String,

    /// Directory of finished archives. Its path relative to each session
    /// archive's parent directory is "../OUTPUT_DIR".
    #[clap(
        long,
        verbatim_doc_comment,
        default_value = OUTPUT_DIR_NAME_DEFAULT,
    )]
    output_dir: String,

    /// Session archive file name extension.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value = INSTRUMENT_EXTENSION_DEFAULT,
    )]
    extension: String,

    /// Directory of raw navigation logs relative to ROOT, with an optional
    /// log family and an optional file name regular expression,
    /// DIR[:FAMILY[:PATTERN]], e.g. "pcs", "gyro:heading" or
    /// "gyro:heading:\.log$". The default family is "nav". The default
    /// pattern is --log-pattern. May be passed more than once.
    /// Default is "pcs:nav".
    #[clap(
        long = "log-dir",
        verbatim_doc_comment,
        value_parser = cli_process_log_dir,
    )]
    log_dirs: Vec<CLI_Log_Dir>,

    /// Only read log files with a file name matching this regular
    /// expression, unless the --log-dir passes its own.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value = LOG_FILENAME_PATTERN_DEFAULT,
        value_parser = cli_process_regex,
    )]
    log_pattern: Regex,

    /// Translation of $GPRMC sentences.
    /// "velocity" creates a $GPVTG.
    /// "fix-and-heading" creates a $GPGGA and a $GPHDT, the heading is
    /// the course over ground.
    #[clap(
        long,
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Composite_Mode::velocity,
    )]
    composite_mode: CLI_Composite_Mode,

    /// "unpack" each session archive to a folder named like the archive
    /// without the extension, or use an existing "sibling" folder named
    /// like the archive with "_FILES" appended.
    #[clap(
        long,
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Extract_Mode::sibling,
    )]
    extract_mode: CLI_Extract_Mode,

    /// Container format of session archives.
    #[clap(
        long,
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Container::zip,
    )]
    container: CLI_Container,

    /// Factor from knots to km/h for $GPVTG speed.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value_t = KNOTS_TO_KMH,
        value_parser = cli_process_knots_to_kmh,
    )]
    knots_to_kmh: f64,

    /// Print a summary of logs and sessions processed to stderr.
    #[clap(
        short,
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// `clap` argument processor for `--log-dir`.
///
/// The pattern is the remainder after the second separator so it may
/// itself hold the separator.
fn cli_process_log_dir(value: &str) -> std::result::Result<CLI_Log_Dir, String> {
    let mut parts = value.splitn(3, CLI_LOG_DIR_SEP);
    let dir: &str = parts.next().unwrap_or_default();
    if dir.is_empty() {
        return Err(format!("empty directory in {:?}", value));
    }
    let family: &'static LogFamily = match parts.next() {
        None | Some("") => &LOG_FAMILY_NAV,
        Some(name) => match log_family_from_name(name) {
            Some(family) => family,
            None => {
                return Err(format!("unknown log family {:?} in {:?}", name, value));
            }
        },
    };
    let name_pattern: Option<Regex> = match parts.next() {
        None | Some("") => None,
        Some(pattern) => Some(cli_process_regex(pattern)?),
    };

    Ok(CLI_Log_Dir {
        dir: dir.to_string(),
        family,
        name_pattern,
    })
}

/// `clap` argument processor for `--log-pattern`.
fn cli_process_regex(value: &str) -> std::result::Result<Regex, String> {
    match Regex::new(value) {
        Ok(val) => Ok(val),
        Err(err) => Err(format!("bad regular expression {:?}; {}", value, err)),
    }
}

/// `clap` argument processor for `--knots-to-kmh`.
fn cli_process_knots_to_kmh(value: &str) -> std::result::Result<f64, String> {
    match value.parse::<f64>() {
        Ok(val) if val.is_finite() && val > 0.0 => Ok(val),
        Ok(val) => Err(format!("--knots-to-kmh must be a positive number, not {}", val)),
        Err(err) => Err(format!("Unable to parse a number for --knots-to-kmh {:?}; {}", value, err)),
    }
}

/// Create the [`BatchConfig`] from the parsed `args`.
fn cli_process_args(args: &CLI_Args) -> BatchConfig {
    defn!();
    let mut config = BatchConfig::new(args.root.clone());
    config.session_dir_name = args.session_dir.clone();
    config.session_index.output_dir_name = args.output_dir.clone();
    config.session_index.extension = args.extension.clone();
    config.session_index.extract_mode = match args.extract_mode {
        CLI_Extract_Mode::unpack => ExtractMode::Unpack,
        CLI_Extract_Mode::sibling => ExtractMode::Sibling,
    };
    config.container_format = match args.container {
        CLI_Container::zip => ContainerFormat::Zip,
        CLI_Container::tar => ContainerFormat::Tar,
        CLI_Container::tar_gz => ContainerFormat::TarGz,
    };
    config.translator_options = TranslatorOptions {
        composite_mode: match args.composite_mode {
            CLI_Composite_Mode::velocity => CompositeMode::Velocity,
            CLI_Composite_Mode::fix_and_heading => CompositeMode::FixAndHeading,
        },
        knots_to_kmh: args.knots_to_kmh,
    };
    config.log_sources = if args.log_dirs.is_empty() {
        vec![LogSource::new(
            String::from(LOG_DIR_NAME_DEFAULT),
            &LOG_FAMILY_NAV,
            args.log_pattern.clone(),
        )]
    } else {
        args.log_dirs
            .iter()
            .map(|log_dir| {
                LogSource::new(
                    log_dir.dir.clone(),
                    log_dir.family,
                    log_dir
                        .name_pattern
                        .clone()
                        .unwrap_or_else(|| args.log_pattern.clone()),
                )
            })
            .collect()
    };
    for _source in config.log_sources.iter() {
        defo!("log source {}", _source);
    }
    defx!();

    config
}

/// Run the batch. Returns `false` if any session failed.
fn run(args: &CLI_Args) -> Result<bool> {
    let config: BatchConfig = cli_process_args(args);
    let summary: SummaryBatch = run_batch(&config)
        .with_context(|| format!("batch {:?} not processed", config.root))?;
    if args.summary {
        print_summary(&summary, &mut std::io::stderr().lock()).context("print summary failed")?;
    }
    if summary.sessions.is_empty() {
        e_wrn!("no sessions processed");
    }
    let failed = summary.sessions_failed();
    if failed != 0 {
        e_err!("{} of {} sessions failed", failed, summary.sessions.len());
    }

    Ok(summary.is_ok())
}

/// Process the user-passed command-line arguments, run the batch,
/// determine a process return code.
pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();
    let args = CLI_Args::parse();

    let exitcode = match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            e_err!("{:#}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
