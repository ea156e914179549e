// src/writers/archiverepacker.rs

//! Unpack and repack instrument session archives.
//!
//! A session archive is a general purpose container (a `.zip` for the
//! instrument) renamed with the instrument extension. Repacking packs the
//! entire working folder, the original session files plus the positioning
//! file, then renames the container to the instrument extension.

use std::fmt;
use std::fs::create_dir_all;
use std::io::{BufReader, BufWriter, Error, ErrorKind, Read, Result, Write};
use std::path::{Path, PathBuf};

use ::flate2::read::GzDecoder;
use ::flate2::write::GzEncoder;
use ::flate2::Compression;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::walkdir::WalkDir;
use ::zip::write::SimpleFileOptions;
use ::zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::common::{
    err_from_err_path,
    err_from_err_path_result,
    Count,
    FPath,
    File,
    FileOpenOptions,
};
use crate::data::session::Session;
use crate::readers::helpers::{path_append_suffix, path_to_fpath};

/// Container format of session archives.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ContainerFormat {
    /// the instrument's own container
    #[default]
    Zip,
    Tar,
    TarGz,
}

impl ContainerFormat {
    /// File name extension of a packed container, before the rename to
    /// the instrument extension.
    pub const fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Zip => ".zip",
            ContainerFormat::Tar => ".tar",
            ContainerFormat::TarGz => ".tar.gz",
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerFormat::Zip => write!(f, "zip"),
            ContainerFormat::Tar => write!(f, "tar"),
            ContainerFormat::TarGz => write!(f, "tar.gz"),
        }
    }
}

/// Convert a `zip` crate error to an `Error` with the path.
fn err_from_zip(
    error: ::zip::result::ZipError,
    fpath: &FPath,
    mesg: &str,
) -> Error {
    match error {
        ::zip::result::ZipError::Io(err) => err_from_err_path(&err, fpath, Some(mesg)),
        err => Error::new(ErrorKind::InvalidData, format!("{} for file {:?}; {}", err, fpath, mesg)),
    }
}

fn open_read(path: &Path) -> Result<File> {
    let mut open_options = FileOpenOptions::new();
    match open_options.read(true).open(path) {
        Ok(val) => Ok(val),
        Err(err) => err_from_err_path_result::<File>(&err, &path_to_fpath(path), Some("open failed")),
    }
}

fn open_write(path: &Path) -> Result<File> {
    let mut open_options = FileOpenOptions::new();
    match open_options
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
    {
        Ok(val) => Ok(val),
        Err(err) => err_from_err_path_result::<File>(&err, &path_to_fpath(path), Some("create failed")),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// unpack
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Unpack every entry of the tar archive `archive` into `folder`.
/// Returns the count of files unpacked.
fn unpack_tar<R: Read>(
    mut archive: ::tar::Archive<R>,
    folder: &Path,
    fpath: &FPath,
) -> Result<Count> {
    let mut count: Count = 0;
    let entries = match archive.entries() {
        Ok(val) => val,
        Err(err) => {
            return err_from_err_path_result::<Count>(&err, fpath, Some("archive.entries() failed"));
        }
    };
    for entry_res in entries {
        let mut entry = match entry_res {
            Ok(val) => val,
            Err(err) => {
                defx!("Tar: entry Err {:?}", err);
                return err_from_err_path_result::<Count>(&err, fpath, Some("tar entry unreadable"));
            }
        };
        let is_file: bool = entry.header().entry_type().is_file();
        match entry.unpack_in(folder) {
            Ok(true) => {
                if is_file {
                    count += 1;
                }
            }
            Ok(false) => {
                defo!("Tar: skip entry outside of {:?}", folder);
            }
            Err(err) => {
                defx!("Tar: unpack_in Err {:?}", err);
                return err_from_err_path_result::<Count>(&err, fpath, Some("tar entry unpack failed"));
            }
        }
    }

    Ok(count)
}

/// Unpack the session archive `archive` into `folder`, creating `folder`
/// if needed. Returns the count of files unpacked.
pub fn unpack_archive(
    archive: &Path,
    folder: &Path,
    format: ContainerFormat,
) -> Result<Count> {
    defn!("({:?}, {:?}, {})", archive, folder, format);
    let fpath: FPath = path_to_fpath(archive);
    if let Err(err) = create_dir_all(folder) {
        defx!("create_dir_all({:?}) Error {:?}", folder, err);
        return err_from_err_path_result::<Count>(&err, &path_to_fpath(folder), Some("create working folder failed"));
    }
    let file: File = open_read(archive)?;
    let count: Count = match format {
        ContainerFormat::Zip => {
            let mut zip_archive = match ZipArchive::new(BufReader::new(file)) {
                Ok(val) => val,
                Err(err) => {
                    defx!("Zip: ZipArchive::new Err {:?}", err);
                    return Err(err_from_zip(err, &fpath, "not a readable zip archive"));
                }
            };
            let count: Count = zip_archive
                .file_names()
                .filter(|name| !name.ends_with('/'))
                .count() as Count;
            if let Err(err) = zip_archive.extract(folder) {
                defx!("Zip: extract Err {:?}", err);
                return Err(err_from_zip(err, &fpath, "zip extract failed"));
            }

            count
        }
        ContainerFormat::Tar => unpack_tar(::tar::Archive::new(BufReader::new(file)), folder, &fpath)?,
        ContainerFormat::TarGz => {
            let decoder = GzDecoder::new(BufReader::new(file));

            unpack_tar(::tar::Archive::new(decoder), folder, &fpath)?
        }
    };
    defx!("return {}", count);

    Ok(count)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// pack
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One entry of a working folder, in pack order.
#[derive(Debug)]
struct FolderEntry {
    path: PathBuf,
    /// `/` separated path relative to the working folder
    name: String,
    is_dir: bool,
}

/// Every file and directory under `folder`, sorted by file name within
/// each directory, parents before children.
fn folder_entries(folder: &Path) -> Result<Vec<FolderEntry>> {
    let mut entries: Vec<FolderEntry> = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(val) => val,
            Err(err) => {
                let fpath: FPath = match err.path() {
                    Some(path) => path_to_fpath(path),
                    None => path_to_fpath(folder),
                };
                let err_io: Error = err.into();
                return err_from_err_path_result::<Vec<FolderEntry>>(&err_io, &fpath, Some("walk working folder failed"));
            }
        };
        let relative: &Path = match entry.path().strip_prefix(folder) {
            Ok(val) => val,
            Err(_err) => {
                defo!("strip_prefix Err {:?}", _err);
                continue;
            }
        };
        let name: String = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        entries.push(FolderEntry {
            path: entry.path().to_path_buf(),
            name,
            is_dir: entry.file_type().is_dir(),
        });
    }

    Ok(entries)
}

fn pack_zip(
    entries: &[FolderEntry],
    file: File,
    fpath: &FPath,
) -> Result<()> {
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for entry in entries.iter() {
        if entry.is_dir {
            if let Err(err) = writer.add_directory(entry.name.as_str(), options) {
                return Err(err_from_zip(err, fpath, "zip add directory failed"));
            }
            continue;
        }
        if let Err(err) = writer.start_file(entry.name.as_str(), options) {
            return Err(err_from_zip(err, fpath, "zip start file failed"));
        }
        let mut reader = BufReader::new(open_read(&entry.path)?);
        if let Err(err) = std::io::copy(&mut reader, &mut writer) {
            return err_from_err_path_result::<()>(&err, &path_to_fpath(&entry.path), Some("zip write failed"));
        }
    }
    match writer.finish() {
        Ok(mut bufwriter) => match bufwriter.flush() {
            Ok(_) => Ok(()),
            Err(err) => err_from_err_path_result::<()>(&err, fpath, Some("flush failed")),
        },
        Err(err) => Err(err_from_zip(err, fpath, "zip finish failed")),
    }
}

fn pack_tar<W: Write>(
    entries: &[FolderEntry],
    writer: W,
    fpath: &FPath,
) -> Result<W> {
    let mut builder = ::tar::Builder::new(writer);
    for entry in entries.iter() {
        let result = if entry.is_dir {
            builder.append_dir(&entry.name, &entry.path)
        } else {
            builder.append_path_with_name(&entry.path, &entry.name)
        };
        if let Err(err) = result {
            return err_from_err_path_result::<W>(&err, &path_to_fpath(&entry.path), Some("tar append failed"));
        }
    }
    match builder.into_inner() {
        Ok(val) => Ok(val),
        Err(err) => err_from_err_path_result::<W>(&err, fpath, Some("tar finish failed")),
    }
}

/// Pack every file under `folder` into `<out_path_no_ext><format extension>`,
/// creating the parent directory if needed. Returns the path of the packed
/// container.
pub fn pack_folder(
    folder: &Path,
    out_path_no_ext: &Path,
    format: ContainerFormat,
) -> Result<FPath> {
    defn!("({:?}, {:?}, {})", folder, out_path_no_ext, format);
    let out_path: PathBuf = path_append_suffix(out_path_no_ext, format.extension());
    let fpath: FPath = path_to_fpath(&out_path);
    let entries: Vec<FolderEntry> = folder_entries(folder)?;
    defo!("{} entries", entries.len());
    if let Some(parent) = out_path.parent() {
        if let Err(err) = create_dir_all(parent) {
            return err_from_err_path_result::<FPath>(&err, &path_to_fpath(parent), Some("create output directory failed"));
        }
    }
    let file: File = open_write(&out_path)?;
    match format {
        ContainerFormat::Zip => pack_zip(&entries, file, &fpath)?,
        ContainerFormat::Tar => {
            let mut bufwriter = pack_tar(&entries, BufWriter::new(file), &fpath)?;
            if let Err(err) = bufwriter.flush() {
                return err_from_err_path_result::<FPath>(&err, &fpath, Some("flush failed"));
            }
        }
        ContainerFormat::TarGz => {
            let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
            let encoder = pack_tar(&entries, encoder, &fpath)?;
            match encoder.finish() {
                Ok(mut bufwriter) => {
                    if let Err(err) = bufwriter.flush() {
                        return err_from_err_path_result::<FPath>(&err, &fpath, Some("flush failed"));
                    }
                }
                Err(err) => {
                    return err_from_err_path_result::<FPath>(&err, &fpath, Some("gzip finish failed"));
                }
            }
        }
    }
    defx!("return {:?}", fpath);

    Ok(fpath)
}

/// Rename the packed container `packed` to `<out_path_no_ext><extension>`,
/// replacing any prior file. Returns the new path.
pub fn rename_to_instrument_extension(
    packed: &Path,
    out_path_no_ext: &Path,
    extension: &str,
) -> Result<FPath> {
    let target: PathBuf = path_append_suffix(out_path_no_ext, extension);
    defñ!("({:?}) → {:?}", packed, target);
    if let Err(err) = std::fs::rename(packed, &target) {
        return err_from_err_path_result::<FPath>(&err, &path_to_fpath(packed), Some("rename failed"));
    }

    Ok(path_to_fpath(&target))
}

/// Pack the working folder of `session` then rename the container with
/// `extension`. Returns the final archive path.
pub fn repack_session(
    session: &Session,
    format: ContainerFormat,
    extension: &str,
) -> Result<FPath> {
    defn!("({})", session);
    let packed: FPath = pack_folder(&session.extracted_folder_path, &session.output_archive_path, format)?;
    let fpath: FPath = rename_to_instrument_extension(Path::new(&packed), &session.output_archive_path, extension)?;
    defx!("return {:?}", fpath);

    Ok(fpath)
}
