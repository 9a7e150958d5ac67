//! Roundtrips through a real child process.

use std::ffi::OsStr;

use edhere_core::{Outcome, Phase, ProcessLauncher, Roundtrip};
use edhere_types::ErrorKind;

use crate::common::{FakeField, FakeResolver, RecordingPrompter, Staging};

#[test]
fn editor_that_exits_without_saving_is_unchanged() {
    let staging = Staging::new();
    let field = FakeField::new("kept as is");
    let resolver = FakeResolver::focused(&field);
    let prompter = RecordingPrompter::declining();

    // `cat` reads the staged file and exits without writing to it.
    let outcome = Roundtrip::new(
        &resolver,
        &ProcessLauncher,
        &prompter,
        staging.store(),
        OsStr::new("cat"),
    )
    .run()
    .expect("roundtrip");

    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(field.text(), "kept as is");
    assert_eq!(field.writes(), 0);
    assert_eq!(staging.leftovers(), 0);
}

#[test]
fn editor_that_cannot_start_is_fatal() {
    let staging = Staging::new();
    let field = FakeField::new("text");
    let resolver = FakeResolver::focused(&field);
    let prompter = RecordingPrompter::accepting();

    let err = Roundtrip::new(
        &resolver,
        &ProcessLauncher,
        &prompter,
        staging.store(),
        OsStr::new("edhere-no-such-editor-3f9a1c"),
    )
    .run()
    .expect_err("fatal");

    assert_eq!(err.kind, ErrorKind::EditorStart);
    assert_eq!(err.phase, Phase::Staged);
    assert!(prompter.offers().is_empty());
    assert_eq!(staging.leftovers(), 0);
}
