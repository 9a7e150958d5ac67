//! Shared test utilities and fixtures
//!
//! In-memory stand-ins for the focused field, the editor and the dialogs, plus
//! a throwaway staging directory.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs::{self, File};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use edhere_core::{
    EditorLauncher, FocusResolver, FocusedControl, Prompter, StagingStore,
};
use edhere_types::{EditorCommand, ErrorKind, TextBuffer};
use tempfile::TempDir;

/// The state behind a fake input field, shared between the test and the control.
#[derive(Debug, Default)]
pub struct FakeField {
    text: RefCell<TextBuffer>,
    alive: Cell<bool>,
    die_on_write: Cell<bool>,
    writes: Cell<usize>,
}

impl FakeField {
    pub fn with_text(text: TextBuffer) -> Rc<Self> {
        Rc::new(Self {
            text: RefCell::new(text),
            alive: Cell::new(true),
            die_on_write: Cell::new(false),
            writes: Cell::new(0),
        })
    }

    pub fn new(text: &str) -> Rc<Self> {
        Self::with_text(TextBuffer::from(text))
    }

    pub fn text(&self) -> String {
        self.text.borrow().to_string_lossy()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// The owning window is closed.
    pub fn destroy(&self) {
        self.alive.set(false);
    }

    /// The window is closed while it handles the next write.
    pub fn destroy_on_write(&self) {
        self.die_on_write.set(true);
    }
}

pub struct FakeResolver {
    result: Result<Rc<FakeField>, ErrorKind>,
}

impl FakeResolver {
    pub fn focused(field: &Rc<FakeField>) -> Self {
        Self {
            result: Ok(Rc::clone(field)),
        }
    }

    pub fn failing(kind: ErrorKind) -> Self {
        Self { result: Err(kind) }
    }
}

impl FocusResolver for FakeResolver {
    type Control = FakeControl;

    fn resolve(&self) -> Result<FakeControl, ErrorKind> {
        self.result.clone().map(FakeControl)
    }
}

pub struct FakeControl(Rc<FakeField>);

impl FocusedControl for FakeControl {
    fn read_text(&self) -> Result<TextBuffer, ErrorKind> {
        Ok(self.0.text.borrow().clone())
    }

    fn write_text(&self, text: &TextBuffer) {
        *self.0.text.borrow_mut() = text.clone();
        self.0.writes.set(self.0.writes.get() + 1);
        if self.0.die_on_write.get() {
            self.0.alive.set(false);
        }
    }

    fn is_alive(&self) -> bool {
        self.0.alive.get()
    }
}

type EditFn = Box<dyn Fn(usize, &Path) -> Result<(), ErrorKind>>;

/// Stands in for the editor: records every command and runs `edit` with the
/// zero-based launch number and the staged path.
pub struct ScriptedLauncher {
    edit: EditFn,
    commands: RefCell<Vec<EditorCommand>>,
    seen: RefCell<Vec<Option<Vec<u8>>>>,
}

impl ScriptedLauncher {
    pub fn new(edit: impl Fn(usize, &Path) -> Result<(), ErrorKind> + 'static) -> Self {
        Self {
            edit: Box::new(edit),
            commands: RefCell::new(Vec::new()),
            seen: RefCell::new(Vec::new()),
        }
    }

    /// An editor the user closes without saving.
    pub fn untouched() -> Self {
        Self::new(|_, _| Ok(()))
    }

    pub fn commands(&self) -> Vec<EditorCommand> {
        self.commands.borrow().clone()
    }

    pub fn runs(&self) -> usize {
        self.commands.borrow().len()
    }

    /// Staged file content as each launch found it (`None` if it was missing).
    pub fn seen(&self) -> Vec<Option<Vec<u8>>> {
        self.seen.borrow().clone()
    }
}

impl EditorLauncher for ScriptedLauncher {
    fn run(&self, command: &EditorCommand) -> Result<(), ErrorKind> {
        let index = self.commands.borrow().len();
        self.commands.borrow_mut().push(command.clone());
        self.seen.borrow_mut().push(fs::read(command.file()).ok());
        (self.edit)(index, command.file())
    }
}

/// Write `bytes` and push the modification time forward so the save is visible
/// regardless of timestamp granularity.
pub fn save(path: &Path, bytes: &[u8]) {
    let previous = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .expect("staged file mtime");
    fs::write(path, bytes).expect("save staged file");
    File::options()
        .write(true)
        .open(path)
        .and_then(|file| file.set_modified(previous + Duration::from_secs(2)))
        .expect("bump staged file mtime");
}

#[derive(Debug, Default)]
pub struct RecordingPrompter {
    accept_recovery: bool,
    warnings: RefCell<Vec<ErrorKind>>,
    offers: RefCell<Vec<ErrorKind>>,
}

impl RecordingPrompter {
    pub fn declining() -> Self {
        Self::default()
    }

    pub fn accepting() -> Self {
        Self {
            accept_recovery: true,
            ..Self::default()
        }
    }

    pub fn warnings(&self) -> Vec<ErrorKind> {
        self.warnings.borrow().clone()
    }

    pub fn offers(&self) -> Vec<ErrorKind> {
        self.offers.borrow().clone()
    }
}

impl Prompter for RecordingPrompter {
    fn warn(&self, kind: ErrorKind) {
        self.warnings.borrow_mut().push(kind);
    }

    fn offer_recovery(&self, kind: ErrorKind) -> bool {
        self.offers.borrow_mut().push(kind);
        self.accept_recovery
    }
}

/// A private staging directory.
pub struct Staging {
    dir: TempDir,
    store: StagingStore,
}

impl Staging {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = StagingStore::new(Some(dir.path().to_path_buf()));
        Self { dir, store }
    }

    pub fn store(&self) -> &StagingStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Files still present in the staging directory.
    pub fn leftovers(&self) -> usize {
        fs::read_dir(self.dir.path()).expect("read_dir").count()
    }
}
