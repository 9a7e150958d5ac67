//! Seams to the host desktop: the focused input field and the user-facing dialogs.
//!
//! `edhere-desktop` implements these over Win32; tests implement them in memory.

use edhere_types::{ErrorKind, TextBuffer};

/// Finds the input field holding keyboard focus.
pub trait FocusResolver {
    type Control: FocusedControl;

    /// Fails with `NoFocus`, `NoStyle` or `NoControl`.
    fn resolve(&self) -> Result<Self::Control, ErrorKind>;
}

/// A resolved input field. Observed, never owned: it can disappear at any time.
pub trait FocusedControl {
    /// Whole text content. Fails only with `NoMemory`.
    fn read_text(&self) -> Result<TextBuffer, ErrorKind>;

    /// Replace the whole text content. The control may reject or trim it.
    fn write_text(&self, text: &TextBuffer);

    /// Whether the originally resolved handle still names a live control.
    fn is_alive(&self) -> bool;
}

/// Modal messages shown to the user.
pub trait Prompter {
    /// Show the message for `kind` and wait for acknowledgement.
    fn warn(&self, kind: ErrorKind);

    /// Show the message for `kind` followed by the recovery question.
    /// Returns `true` when the user wants the editor reopened.
    fn offer_recovery(&self, kind: ErrorKind) -> bool;
}
