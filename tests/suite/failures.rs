//! Failures before or during the first editor launch: reported as fatal, no
//! editor left running, nothing left in the staging directory.

use std::ffi::{OsStr, OsString};

use edhere_config::Settings;
use edhere_core::{Phase, Roundtrip, StagingStore};
use edhere_types::{EDITOR_COMMAND_CAPACITY, ErrorKind, TextBuffer};

use crate::common::{FakeField, FakeResolver, RecordingPrompter, ScriptedLauncher, Staging};

const EDITOR: &str = "notepad.exe";

#[test]
fn missing_editor_setting_stops_before_staging() {
    let staging = Staging::new();

    let settings = Settings::resolve(|_| None::<OsString>, None);

    assert_eq!(settings, Err(ErrorKind::NoEditor));
    assert_eq!(staging.leftovers(), 0);
}

#[test]
fn focus_failures_are_fatal_and_touch_nothing() {
    for kind in [ErrorKind::NoFocus, ErrorKind::NoStyle, ErrorKind::NoControl] {
        let staging = Staging::new();
        let resolver = FakeResolver::failing(kind);
        let launcher = ScriptedLauncher::untouched();
        let prompter = RecordingPrompter::declining();

        let err = Roundtrip::new(
            &resolver,
            &launcher,
            &prompter,
            staging.store(),
            OsStr::new(EDITOR),
        )
        .run()
        .expect_err("fatal");

        assert_eq!(err.kind, kind);
        assert_eq!(err.phase, Phase::Idle);
        assert_eq!(launcher.runs(), 0);
        assert!(prompter.offers().is_empty());
        assert_eq!(staging.leftovers(), 0);
    }
}

#[test]
fn unencodable_field_text_is_fatal() {
    let staging = Staging::new();
    let field = FakeField::with_text(TextBuffer::from_units(vec![0x0068, 0xDC00]));
    let resolver = FakeResolver::focused(&field);
    let launcher = ScriptedLauncher::untouched();
    let prompter = RecordingPrompter::declining();

    let err = Roundtrip::new(
        &resolver,
        &launcher,
        &prompter,
        staging.store(),
        OsStr::new(EDITOR),
    )
    .run()
    .expect_err("fatal");

    assert_eq!(err.kind, ErrorKind::ToStorageEncodingFailed);
    assert_eq!(err.phase, Phase::Resolved);
    assert_eq!(launcher.runs(), 0);
    assert_eq!(staging.leftovers(), 0);
}

#[test]
fn unusable_staging_dir_is_fatal() {
    let staging = Staging::new();
    let store = StagingStore::new(Some(staging.path().join("missing")));
    let field = FakeField::new("text");
    let resolver = FakeResolver::focused(&field);
    let launcher = ScriptedLauncher::untouched();
    let prompter = RecordingPrompter::declining();

    let err = Roundtrip::new(&resolver, &launcher, &prompter, &store, OsStr::new(EDITOR))
        .run()
        .expect_err("fatal");

    assert_eq!(err.kind, ErrorKind::TmpDir);
    assert_eq!(err.phase, Phase::Captured);
    assert_eq!(launcher.runs(), 0);
    assert_eq!(staging.leftovers(), 0);
}

#[test]
fn oversized_command_is_fatal_and_removes_staged_file() {
    let staging = Staging::new();
    let field = FakeField::new("text");
    let resolver = FakeResolver::focused(&field);
    let launcher = ScriptedLauncher::untouched();
    let prompter = RecordingPrompter::declining();
    let editor = "e".repeat(EDITOR_COMMAND_CAPACITY);

    let err = Roundtrip::new(
        &resolver,
        &launcher,
        &prompter,
        staging.store(),
        OsStr::new(&editor),
    )
    .run()
    .expect_err("fatal");

    assert_eq!(err.kind, ErrorKind::EditorCmd);
    assert_eq!(err.phase, Phase::Staged);
    assert_eq!(launcher.runs(), 0);
    assert_eq!(field.text(), "text");
    assert_eq!(staging.leftovers(), 0);
}

#[test]
fn launch_failure_is_fatal_and_removes_staged_file() {
    let staging = Staging::new();
    let field = FakeField::new("text");
    let resolver = FakeResolver::focused(&field);
    let launcher = ScriptedLauncher::new(|_, _| Err(ErrorKind::EditorStart));
    let prompter = RecordingPrompter::accepting();

    let err = Roundtrip::new(
        &resolver,
        &launcher,
        &prompter,
        staging.store(),
        OsStr::new(EDITOR),
    )
    .run()
    .expect_err("fatal");

    assert_eq!(err.kind, ErrorKind::EditorStart);
    assert_eq!(err.phase, Phase::Staged);
    assert_eq!(launcher.runs(), 1);
    assert!(prompter.offers().is_empty(), "no recovery before an editor ran");
    assert_eq!(field.writes(), 0);
    assert_eq!(staging.leftovers(), 0);
}
