//! Hosts without a focused-field API: messages on stderr, answers on stdin.

use std::io::{self, BufRead, Write};

use edhere_core::{FocusResolver, FocusedControl, Prompter};
use edhere_types::{APP_TITLE, ErrorKind, TextBuffer, recovery_message};

/// Always fails with `NoFocus`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedResolver;

impl FocusResolver for UnsupportedResolver {
    type Control = UnsupportedControl;

    fn resolve(&self) -> Result<UnsupportedControl, ErrorKind> {
        tracing::warn!("Focused input field capture is only available on Windows");
        Err(ErrorKind::NoFocus)
    }
}

/// Never constructed; exists to satisfy [`FocusResolver::Control`].
#[derive(Debug)]
pub enum UnsupportedControl {}

impl FocusedControl for UnsupportedControl {
    fn read_text(&self) -> Result<TextBuffer, ErrorKind> {
        match *self {}
    }

    fn write_text(&self, _text: &TextBuffer) {
        match *self {}
    }

    fn is_alive(&self) -> bool {
        match *self {}
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn warn(&self, kind: ErrorKind) {
        let _ = writeln!(io::stderr().lock(), "{APP_TITLE}: {kind}");
    }

    fn offer_recovery(&self, kind: ErrorKind) -> bool {
        ask(
            &mut io::stdin().lock(),
            &mut io::stderr().lock(),
            &recovery_message(kind),
        )
    }
}

/// Print `question` with a `[y/N]` suffix and read one line. Anything but yes is no.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> bool {
    if write!(output, "{APP_TITLE}: {question} [y/N] ")
        .and_then(|()| output.flush())
        .is_err()
    {
        return false;
    }
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(_) => is_yes(&line),
        Err(e) => {
            tracing::debug!("Failed to read recovery answer: {e}");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
