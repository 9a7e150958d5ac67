//! Editor process launch.

use std::process::Command;

use edhere_types::{EditorCommand, ErrorKind};

/// Runs the editor against the staged file and blocks until it exits.
pub trait EditorLauncher {
    fn run(&self, command: &EditorCommand) -> Result<(), ErrorKind>;
}

/// Launches the editor as a child process.
///
/// The staged path is passed as one argument, so temp directories with spaces
/// in them reach the editor intact. There is no timeout: the user may keep the
/// editor open for as long as they like.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl EditorLauncher for ProcessLauncher {
    fn run(&self, command: &EditorCommand) -> Result<(), ErrorKind> {
        tracing::info!(command = %command.command_line(), "Launching editor");

        let mut child = Command::new(command.program())
            .arg(command.file())
            .spawn()
            .map_err(|e| {
                tracing::warn!(command = %command.command_line(), "Failed to launch editor: {e}");
                ErrorKind::EditorStart
            })?;

        // Only the staged file's timestamp decides what happened; the exit code is informational.
        match child.wait() {
            Ok(status) => tracing::info!(%status, "Editor exited"),
            Err(e) => tracing::warn!("Failed to wait for editor: {e}"),
        }
        Ok(())
    }
}
