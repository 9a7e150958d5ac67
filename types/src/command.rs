//! Editor command construction.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::ErrorKind;

/// Longest path the Win32 ANSI/wide path APIs accept, terminator included.
pub const MAX_PATH: usize = 260;

/// Capacity of the rendered command line in UTF-16 units, terminator included:
/// two quotes, a separating space, and two paths.
pub const EDITOR_COMMAND_CAPACITY: usize = MAX_PATH * 2 + 3;

/// Length of an OS string in the units the platform measures command lines in
/// (UTF-16 units on Windows, bytes elsewhere).
#[must_use]
pub fn os_str_units(value: &OsStr) -> usize {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStrExt;
        value.encode_wide().count()
    }
    #[cfg(not(windows))]
    {
        value.len()
    }
}

/// `"<editor>" <file>`: the editor program applied to the staged file.
///
/// Built once per invocation and reused verbatim for a recovery relaunch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: OsString,
    file: PathBuf,
}

impl EditorCommand {
    /// Fails with [`ErrorKind::EditorCmd`] when the rendered command line would not fit
    /// [`EDITOR_COMMAND_CAPACITY`]. The command is never truncated.
    pub fn new(program: &OsStr, file: &Path) -> Result<Self, ErrorKind> {
        if program.is_empty() {
            return Err(ErrorKind::EditorCmd);
        }
        let units = os_str_units(program)
            .checked_add(os_str_units(file.as_os_str()))
            .and_then(|n| n.checked_add(3))
            .ok_or(ErrorKind::EditorCmd)?;
        if units >= EDITOR_COMMAND_CAPACITY {
            return Err(ErrorKind::EditorCmd);
        }
        Ok(Self {
            program: program.to_os_string(),
            file: file.to_path_buf(),
        })
    }

    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Human-readable command line for logs.
    #[must_use]
    pub fn command_line(&self) -> String {
        format!(
            "\"{}\" {}",
            self.program.to_string_lossy(),
            self.file.display()
        )
    }
}
