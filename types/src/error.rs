//! The fixed catalog of failure kinds.
//!
//! Every OS or IO failure is translated into one of these kinds at the point
//! where it is detected. The `Display` text is the sentence shown to the user.

use thiserror::Error;

/// Appended to the message of a recoverable failure before asking Yes/No.
pub const RECOVERY_PROMPT: &str = "Do you want to reopen your editor to recover your work?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("The EDITOR environment variable must be set to the path or name of an editor.")]
    NoEditor,
    #[error("The EDITOR environment variable's value is too long.")]
    EditorTooLong,
    #[error("No active input field could be found. The current program may not be supported.")]
    NoFocus,
    #[error("Error getting the input field's details.")]
    NoStyle,
    #[error("No active input field could be found. The current program may not be supported.")]
    NoControl,
    #[error("Error allocating memory.")]
    NoMemory,
    #[error("Error getting the temporary directory path.")]
    TmpDir,
    #[error("Error generating a temporary file path.")]
    TmpFile,
    #[error("Error creating a temporary file.")]
    TmpCreate,
    #[error("Error reopening the temporary file.")]
    TmpReopen,
    #[error("Error reading from the temporary file.")]
    TmpRead,
    #[error("Error writing to the temporary file.")]
    TmpWrite,
    #[error("Error getting the temporary file's modification time.")]
    TmpTime,
    #[error("Error getting the temporary file's size.")]
    TmpSize,
    #[error("Error converting text to UTF-8.")]
    ToStorageEncodingFailed,
    #[error("Error converting text from UTF-8.")]
    FromStorageEncodingFailed,
    #[error("Error constructing the editor command line.")]
    EditorCmd,
    #[error("Error launching the editor.")]
    EditorStart,
    #[error("The original input field is gone.")]
    WindowGone,
}

impl ErrorKind {
    /// Stable identifier used in log records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoEditor => "no_editor",
            Self::EditorTooLong => "editor_too_long",
            Self::NoFocus => "no_focus",
            Self::NoStyle => "no_style",
            Self::NoControl => "no_control",
            Self::NoMemory => "no_memory",
            Self::TmpDir => "tmp_dir",
            Self::TmpFile => "tmp_file",
            Self::TmpCreate => "tmp_create",
            Self::TmpReopen => "tmp_reopen",
            Self::TmpRead => "tmp_read",
            Self::TmpWrite => "tmp_write",
            Self::TmpTime => "tmp_time",
            Self::TmpSize => "tmp_size",
            Self::ToStorageEncodingFailed => "to_utf8",
            Self::FromStorageEncodingFailed => "from_utf8",
            Self::EditorCmd => "editor_cmd",
            Self::EditorStart => "editor_start",
            Self::WindowGone => "window_gone",
        }
    }
}

/// Full text of a recovery offer: the failure sentence, a blank line, the question.
#[must_use]
pub fn recovery_message(kind: ErrorKind) -> String {
    format!("{kind}\n\n{RECOVERY_PROMPT}")
}
