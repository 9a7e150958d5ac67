//! Capture → edit → write-back state machine.
//!
//! ```text
//! Idle -> Resolved -> Captured -> Staged -> Editing -> Diffed -+-> Unchanged -+-> Done
//!                                                              |              |
//!                                                              +-> Applying --+
//!
//!                                 any failure after Editing -> Recovering
//! ```
//!
//! Before the editor has run there is nothing to lose, so every failure is
//! returned as a [`FatalError`]. After it has run, the user's work may exist only
//! in the staged file or in the editor's buffer, so failures are reported through
//! the [`Prompter`] with an offer to reopen the editor on the same file, and the
//! invocation ends with [`Outcome::Failed`].

use std::ffi::OsStr;

use edhere_types::{EditorCommand, ErrorKind, Fingerprint};
use thiserror::Error;

use crate::encoding::{from_storage_encoding, to_storage_encoding};
use crate::launcher::EditorLauncher;
use crate::staging::{StagedFile, StagingStore};
use crate::target::{FocusResolver, FocusedControl, Prompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Resolved,
    Captured,
    Staged,
    Editing,
    Diffed,
    Unchanged,
    Applying,
    Done,
    Recovering,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resolved => "resolved",
            Self::Captured => "captured",
            Self::Staged => "staged",
            Self::Editing => "editing",
            Self::Diffed => "diffed",
            Self::Unchanged => "unchanged",
            Self::Applying => "applying",
            Self::Done => "done",
            Self::Recovering => "recovering",
        }
    }

    /// Whether an editor process has already run when this phase is reached.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        !matches!(
            self,
            Self::Idle | Self::Resolved | Self::Captured | Self::Staged
        )
    }
}

/// What the user chose when offered to reopen the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Declined,
    Relaunched,
    RelaunchFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The staged file was not saved; the field was left alone.
    Unchanged,
    /// The edited text was written into the field.
    Applied,
    /// The editor ran but its result could not be applied.
    Failed { kind: ErrorKind, recovery: Recovery },
}

impl Outcome {
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Unchanged | Self::Applied => 0,
            Self::Failed { .. } => 1,
        }
    }
}

/// A failure before any editor ran. Nothing is left on disk when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct FatalError {
    pub kind: ErrorKind,
    /// Last phase reached before the failure.
    pub phase: Phase,
}

/// One invocation: resolve the focused field, stage its text, run the editor,
/// and write the result back.
pub struct Roundtrip<'a, R, L, P> {
    resolver: &'a R,
    launcher: &'a L,
    prompter: &'a P,
    store: &'a StagingStore,
    editor: &'a OsStr,
    phase: Phase,
}

impl<'a, R, L, P> Roundtrip<'a, R, L, P>
where
    R: FocusResolver,
    L: EditorLauncher,
    P: Prompter,
{
    #[must_use]
    pub fn new(
        resolver: &'a R,
        launcher: &'a L,
        prompter: &'a P,
        store: &'a StagingStore,
        editor: &'a OsStr,
    ) -> Self {
        Self {
            resolver,
            launcher,
            prompter,
            store,
            editor,
            phase: Phase::Idle,
        }
    }

    pub fn run(mut self) -> Result<Outcome, FatalError> {
        let control = self.resolver.resolve().map_err(|kind| self.fatal(kind))?;
        self.advance(Phase::Resolved);

        let text = control.read_text().map_err(|kind| self.fatal(kind))?;
        let bytes = to_storage_encoding(&text).map_err(|kind| self.fatal(kind))?;
        tracing::debug!(units = text.len(), bytes = bytes.len(), "Field text captured");
        drop(text);
        self.advance(Phase::Captured);

        let pending = self.store.create_unique().map_err(|kind| self.fatal(kind))?;
        let (staged, before) = pending.write(&bytes).map_err(|kind| self.fatal(kind))?;
        drop(bytes);
        self.advance(Phase::Staged);

        let command = match EditorCommand::new(self.editor, staged.path()) {
            Ok(command) => command,
            Err(kind) => {
                staged.remove();
                return Err(self.fatal(kind));
            }
        };
        if let Err(kind) = self.launcher.run(&command) {
            staged.remove();
            return Err(self.fatal(kind));
        }
        self.advance(Phase::Editing);

        let outcome = match self.apply(&control, &staged, before) {
            Ok(outcome) => outcome,
            Err(kind) => {
                self.advance(Phase::Recovering);
                let recovery = self.recover(kind, &command);
                Outcome::Failed { kind, recovery }
            }
        };

        staged.remove();
        if !matches!(outcome, Outcome::Failed { .. }) {
            self.advance(Phase::Done);
        }
        tracing::info!(?outcome, "Roundtrip finished");
        Ok(outcome)
    }

    /// Diff the staged file against `before` and write it back if it changed.
    ///
    /// The reader is dropped on return, before any recovery relaunch needs the file.
    fn apply(
        &mut self,
        control: &R::Control,
        staged: &StagedFile,
        before: Fingerprint,
    ) -> Result<Outcome, ErrorKind> {
        let mut reader = staged.reopen()?;
        let after = reader.fingerprint()?;
        self.advance(Phase::Diffed);

        if !after.differs_from(before) {
            self.advance(Phase::Unchanged);
            return Ok(Outcome::Unchanged);
        }
        self.advance(Phase::Applying);

        let size = reader.size()?;
        let bytes = reader.read_all(size)?;
        drop(reader);
        let text = from_storage_encoding(bytes)?;

        // Checked before the write so nothing is sent to a destroyed or reused handle,
        // and after it because the field can go away while handling the write.
        if !control.is_alive() {
            return Err(ErrorKind::WindowGone);
        }
        control.write_text(&text);
        tracing::debug!(units = text.len(), "Field text replaced");
        if !control.is_alive() {
            return Err(ErrorKind::WindowGone);
        }
        Ok(Outcome::Applied)
    }

    fn recover(&self, kind: ErrorKind, command: &EditorCommand) -> Recovery {
        tracing::warn!(kind = kind.as_str(), "Edit could not be applied; offering recovery");
        if !self.prompter.offer_recovery(kind) {
            return Recovery::Declined;
        }
        match self.launcher.run(command) {
            Ok(()) => Recovery::Relaunched,
            Err(relaunch) => {
                self.prompter.warn(relaunch);
                Recovery::RelaunchFailed
            }
        }
    }

    fn advance(&mut self, next: Phase) {
        tracing::debug!(from = self.phase.as_str(), to = next.as_str(), "Roundtrip phase");
        self.phase = next;
    }

    fn fatal(&self, kind: ErrorKind) -> FatalError {
        debug_assert!(!self.phase.is_recoverable());
        tracing::warn!(kind = kind.as_str(), phase = self.phase.as_str(), "Roundtrip aborted");
        FatalError {
            kind,
            phase: self.phase,
        }
    }
}
