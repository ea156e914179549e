// src/writers/gpsfilewriter.rs

//! Write the positioning file of one session, the `.gps` file the
//! instrument's post-processing software reads.
//!
//! One line per sentence, `<sentence>#<timestamp>\r\n`, e.g.
//!
//! ```text
//! $GPGGA,120000.00,5030.1234,N,00405.4321,W,1,08,1.0,0.0,M,0.0,M,,*43#2021-06-15 12:00:00.00 +00:00
//! ```

use std::io::{BufWriter, Result, Write};
use std::path::{Path, PathBuf};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{
    err_from_err_path_result,
    Count,
    FPath,
    File,
    FileOpenOptions,
};
use crate::data::datetime::DateTimeU;
use crate::data::sentence::TranslatedSentence;
use crate::readers::helpers::path_to_fpath;

/// File name extension of the positioning file.
pub const GPS_FILE_EXTENSION: &str = ".gps";

/// Separates the sentence from the timestamp.
pub const GPS_FIELD_SEPARATOR: char = '#';

/// Line terminator of the positioning file.
pub const GPS_LINE_END: &str = "\r\n";

/// strftime pattern of the whole seconds of a positioning file timestamp
const GPS_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Format `dt` as `YYYY-MM-DD HH:MM:SS.cc +00:00` (centiseconds,
/// truncated).
pub fn format_timestamp(dt: &DateTimeU) -> String {
    // leap seconds are represented as millis >= 1000
    let centis: u32 = dt.timestamp_subsec_millis().min(999) / 10;

    format!("{}.{:02} +00:00", dt.format(GPS_TIMESTAMP_PATTERN), centis)
}

/// Return `<folder>/<name_stem>.gps`.
pub fn gps_file_path(
    folder: &Path,
    name_stem: &str,
) -> PathBuf {
    folder.join(format!("{}{}", name_stem, GPS_FILE_EXTENSION))
}

/// Write `sentences`, in order, to `<folder>/<name_stem>.gps`, replacing
/// any prior file. Returns the file path and the count of lines written.
///
/// An empty `sentences` writes an empty file.
pub fn write_gps_file(
    folder: &Path,
    name_stem: &str,
    sentences: &[TranslatedSentence],
) -> Result<(FPath, Count)> {
    let path: PathBuf = gps_file_path(folder, name_stem);
    let fpath: FPath = path_to_fpath(&path);
    defn!("({:?}, {} sentences)", fpath, sentences.len());
    let mut open_options = FileOpenOptions::new();
    let file: File = match open_options
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
    {
        Ok(val) => val,
        Err(err) => {
            defx!("open({:?}) Error {:?}", fpath, err);
            return err_from_err_path_result::<(FPath, Count)>(&err, &fpath, Some("create positioning file failed"));
        }
    };
    let mut bufwriter: BufWriter<File> = BufWriter::new(file);
    let mut count: Count = 0;
    for sentence in sentences.iter() {
        if let Err(err) = write!(
            bufwriter,
            "{}{}{}{}",
            sentence.text,
            GPS_FIELD_SEPARATOR,
            format_timestamp(&sentence.timestamp),
            GPS_LINE_END
        ) {
            defx!("write Error {:?}", err);
            return err_from_err_path_result::<(FPath, Count)>(&err, &fpath, Some("write positioning file failed"));
        }
        count += 1;
    }
    if let Err(err) = bufwriter.flush() {
        defx!("flush Error {:?}", err);
        return err_from_err_path_result::<(FPath, Count)>(&err, &fpath, Some("flush positioning file failed"));
    }
    defx!("return ({:?}, {})", fpath, count);

    Ok((fpath, count))
}
