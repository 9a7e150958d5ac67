//! Core roundtrip logic for edhere.
//!
//! - **`encoding`**: native UTF-16 text ↔ UTF-8 staging bytes
//! - **`staging`**: the temporary file the editor works on
//! - **`launcher`**: running the editor and waiting for it
//! - **`target`**: traits for the focused field and the user dialogs
//! - **`roundtrip`**: the state machine tying them together

pub mod encoding;
pub mod launcher;
pub mod roundtrip;
pub mod staging;
pub mod target;

pub use encoding::{from_storage_encoding, to_storage_encoding};
pub use launcher::{EditorLauncher, ProcessLauncher};
pub use roundtrip::{FatalError, Outcome, Phase, Recovery, Roundtrip};
pub use staging::{PendingStage, StagedFile, StagedReader, StagingStore};
pub use target::{FocusResolver, FocusedControl, Prompter};
