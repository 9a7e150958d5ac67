//! Core domain types for edhere.
//!
//! This crate contains pure domain types with no IO and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod command;
mod error;
mod fingerprint;
mod text;

pub use command::{EDITOR_COMMAND_CAPACITY, EditorCommand, MAX_PATH, os_str_units};
pub use error::{ErrorKind, RECOVERY_PROMPT, recovery_message};
pub use fingerprint::Fingerprint;
pub use text::TextBuffer;

/// Title used for every user-facing message.
pub const APP_TITLE: &str = "edhere";
