//! Host desktop access for edhere.
//!
//! Windows gets the real implementation: focused field through window messages,
//! messages through `MessageBoxW`. Other hosts get a resolver that reports
//! `NoFocus` and a console prompter, so the binary still builds and fails cleanly.

mod console;
#[cfg(windows)]
mod win32;

pub use console::{ConsolePrompter, UnsupportedControl, UnsupportedResolver};
#[cfg(windows)]
pub use win32::{MessageBoxPrompter, Win32Control, Win32Resolver};

#[cfg(windows)]
pub type PlatformResolver = Win32Resolver;
#[cfg(windows)]
pub type PlatformPrompter = MessageBoxPrompter;

#[cfg(not(windows))]
pub type PlatformResolver = UnsupportedResolver;
#[cfg(not(windows))]
pub type PlatformPrompter = ConsolePrompter;
