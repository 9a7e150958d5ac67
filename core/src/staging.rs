//! Staging store: the temporary file the editor works on.
//!
//! ```text
//! StagingStore::create_unique() -> PendingStage --write()--> StagedFile + Fingerprint
//!                                                               |
//!                                                    reopen()   v
//!                                                           StagedReader
//! ```
//!
//! Both `PendingStage` and `StagedFile` own a `tempfile` path guard, so the
//! file is deleted when they are dropped on an early return. The happy path
//! and the recovery path call [`StagedFile::remove`] explicitly.

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use edhere_types::{ErrorKind, Fingerprint};
use tempfile::{Builder, NamedTempFile, TempPath};

const STAGED_PREFIX: &str = "edh";
// Plain-text extension so editors that pick a mode by extension stay in text mode.
const STAGED_SUFFIX: &str = ".txt";

/// Where staged files are created.
#[derive(Debug, Clone, Default)]
pub struct StagingStore {
    dir: Option<PathBuf>,
}

impl StagingStore {
    /// `None` stages into the OS temp directory.
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn resolve_dir(&self) -> Result<PathBuf, ErrorKind> {
        let dir = self.dir.clone().unwrap_or_else(env::temp_dir);
        match fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => Ok(dir),
            Ok(_) => {
                tracing::warn!(dir = %dir.display(), "Staging path is not a directory");
                Err(ErrorKind::TmpDir)
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), "Staging directory unavailable: {e}");
                Err(ErrorKind::TmpDir)
            }
        }
    }

    /// Create a new uniquely named file in the staging directory.
    pub fn create_unique(&self) -> Result<PendingStage, ErrorKind> {
        let dir = self.resolve_dir()?;
        let file = Builder::new()
            .prefix(STAGED_PREFIX)
            .suffix(STAGED_SUFFIX)
            .tempfile_in(&dir)
            .map_err(|e| {
                tracing::warn!(dir = %dir.display(), "Failed to create staged file: {e}");
                // tempfile gives up with AlreadyExists once its name retries are exhausted.
                if e.kind() == io::ErrorKind::AlreadyExists {
                    ErrorKind::TmpFile
                } else {
                    ErrorKind::TmpCreate
                }
            })?;
        tracing::debug!(path = %file.path().display(), "Staged file created");
        Ok(PendingStage { file })
    }
}

/// A created but not yet written staged file. Holds the only write handle.
#[derive(Debug)]
pub struct PendingStage {
    file: NamedTempFile,
}

impl PendingStage {
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Write the whole payload, close the handle and capture the fingerprint.
    ///
    /// The fingerprint is part of the write: without it there is nothing to diff
    /// against, so failing to read it is reported as `TmpWrite`.
    pub fn write(mut self, bytes: &[u8]) -> Result<(StagedFile, Fingerprint), ErrorKind> {
        if let Err(e) = self.file.write_all(bytes).and_then(|()| self.file.flush()) {
            tracing::warn!(path = %self.path().display(), "Failed to write staged file: {e}");
            return Err(ErrorKind::TmpWrite);
        }

        // Close before reading the timestamp; some filesystems settle it on close.
        let path = self.file.into_temp_path();
        let modified = fs::metadata(&path).and_then(|meta| meta.modified());
        match modified {
            Ok(modified) => {
                tracing::debug!(bytes = bytes.len(), "Staged file written");
                Ok((StagedFile { path }, Fingerprint::from_modified(modified)))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read staged file time: {e}");
                Err(ErrorKind::TmpWrite)
            }
        }
    }
}

/// A written staged file, closed, waiting for or returned from the editor.
#[derive(Debug)]
pub struct StagedFile {
    path: TempPath,
}

impl StagedFile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open for reading. On Windows the handle is exclusive for as long as it lives.
    pub fn reopen(&self) -> Result<StagedReader, ErrorKind> {
        let mut options = OpenOptions::new();
        options.read(true);
        #[cfg(windows)]
        {
            use std::os::windows::fs::OpenOptionsExt;
            options.share_mode(0);
        }

        options
            .open(&self.path)
            .map(|file| StagedReader { file })
            .map_err(|e| {
                tracing::warn!(path = %self.path.display(), "Failed to reopen staged file: {e}");
                ErrorKind::TmpReopen
            })
    }

    /// Delete the file. Best-effort: a failure here must not hide the result.
    pub fn remove(self) {
        let shown = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => tracing::debug!(path = %shown, "Staged file removed"),
            Err(e) => tracing::debug!(path = %shown, "Failed to remove staged file: {e}"),
        }
    }
}

/// Read handle on a staged file after the editor exited.
#[derive(Debug)]
pub struct StagedReader {
    file: File,
}

impl StagedReader {
    pub fn fingerprint(&self) -> Result<Fingerprint, ErrorKind> {
        self.file
            .metadata()
            .and_then(|meta| meta.modified())
            .map(Fingerprint::from_modified)
            .map_err(|e| {
                tracing::warn!("Failed to read staged file time: {e}");
                ErrorKind::TmpTime
            })
    }

    pub fn size(&self) -> Result<u64, ErrorKind> {
        self.file.metadata().map(|meta| meta.len()).map_err(|e| {
            tracing::warn!("Failed to read staged file size: {e}");
            ErrorKind::TmpSize
        })
    }

    /// Read exactly `size` bytes. Fewer is `TmpRead`.
    pub fn read_all(&mut self, size: u64) -> Result<Vec<u8>, ErrorKind> {
        let len = usize::try_from(size).map_err(|_| ErrorKind::NoMemory)?;
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| ErrorKind::NoMemory)?;
        bytes.resize(len, 0);

        self.file.read_exact(&mut bytes).map_err(|e| {
            tracing::warn!(expected = len, "Failed to read staged file: {e}");
            ErrorKind::TmpRead
        })?;
        Ok(bytes)
    }
}
