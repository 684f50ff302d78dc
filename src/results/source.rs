//! Locating files inside a B-RISK result export
//!
//! B-RISK writes each run into a folder that users frequently zip before
//! archiving or sharing. Both layouts are accepted; individual files are
//! found by the suffix B-RISK appends to the run name (e.g. `_log.rtf`).

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};

/// Where the exported result files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    /// Plain results folder
    Directory(PathBuf),

    /// Zip archive of a results folder
    Zip(PathBuf),
}

impl ResultSource {
    /// Resolve `path` to a directory or a zip archive.
    ///
    /// A path without extension that does not exist is retried with `.zip`
    /// appended, since the run name is what users usually have at hand.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.is_dir() {
            return Ok(Self::Directory(path.to_path_buf()));
        }

        if path.is_file() {
            return if is_zip_archive(path) {
                Ok(Self::Zip(path.to_path_buf()))
            } else {
                Err(Error::NotAResultSource(path.to_path_buf()))
            };
        }

        let mut with_extension = path.as_os_str().to_owned();
        with_extension.push(".zip");
        let with_extension = PathBuf::from(with_extension);
        if with_extension.is_file() && is_zip_archive(&with_extension) {
            return Ok(Self::Zip(with_extension));
        }

        Err(Error::NotAResultSource(path.to_path_buf()))
    }

    /// Path of the directory or archive
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(p) | Self::Zip(p) => p,
        }
    }

    /// Names of all candidate files (directory entries or archive entries)
    pub fn file_names(&self) -> Result<Vec<String>> {
        match self {
            Self::Directory(dir) => {
                let mut names = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let entry = entry?;
                    if entry.file_type()?.is_file() {
                        names.push(entry.file_name().to_string_lossy().into_owned());
                    }
                }
                names.sort();
                Ok(names)
            }
            Self::Zip(archive) => {
                let archive = zip::ZipArchive::new(File::open(archive)?)?;
                let mut names: Vec<String> = archive
                    .file_names()
                    .filter(|n| !n.ends_with('/'))
                    .map(str::to_string)
                    .collect();
                names.sort();
                Ok(names)
            }
        }
    }

    /// Read the single file whose name ends with `suffix`.
    ///
    /// # Errors
    ///
    /// - [`Error::FileNotFound`] when nothing matches
    /// - [`Error::AmbiguousFile`] when more than one file matches
    pub fn read_by_suffix(&self, suffix: &str) -> Result<Vec<u8>> {
        let mut matching: Vec<String> = self
            .file_names()?
            .into_iter()
            .filter(|n| n.ends_with(suffix))
            .collect();

        let name = match matching.len() {
            0 => {
                return Err(Error::FileNotFound {
                    suffix: suffix.to_string(),
                })
            }
            1 => matching.remove(0),
            _ => {
                return Err(Error::AmbiguousFile {
                    suffix: suffix.to_string(),
                    candidates: matching,
                })
            }
        };

        log::debug!("reading {name} from {}", self.path().display());

        match self {
            Self::Directory(dir) => Ok(fs::read(dir.join(&name))?),
            Self::Zip(archive) => {
                let mut archive = zip::ZipArchive::new(File::open(archive)?)?;
                let mut file = archive.by_name(&name)?;
                let mut bytes = Vec::with_capacity(file.size() as usize);
                file.read_to_end(&mut bytes)?;
                Ok(bytes)
            }
        }
    }
}

fn is_zip_archive(path: &Path) -> bool {
    File::open(path)
        .ok()
        .and_then(|f| zip::ZipArchive::new(f).ok())
        .is_some()
}
