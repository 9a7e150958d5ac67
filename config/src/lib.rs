//! Configuration for edhere.
//!
//! Two sources, in order of authority:
//!
//! - **`EDITOR`**: required. The path or name of the editor executable.
//! - **`~/.edhere/config.toml`**: optional. Capture delay and staging directory.
//!
//! `EDHERE_DELAY_MS` overrides the capture delay from the file.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use edhere_types::{ErrorKind, MAX_PATH, os_str_units};
use serde::Deserialize;
use thiserror::Error;

pub const EDITOR_ENV: &str = "EDITOR";
pub const DELAY_ENV: &str = "EDHERE_DELAY_MS";

/// Optional settings file.
///
/// ```toml
/// [capture]
/// delay_ms = 3000
///
/// [staging]
/// dir = "D:/scratch"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdhereConfig {
    pub capture: Option<CaptureConfig>,
    pub staging: Option<StagingConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureConfig {
    /// Milliseconds to wait before resolving the focused field. Default: 0.
    #[serde(default)]
    pub delay_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StagingConfig {
    /// Directory for staged files. Default: the OS temp directory.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl EdhereConfig {
    /// Load the config file. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    fn delay_ms(&self) -> u64 {
        self.capture.as_ref().map_or(0, |capture| capture.delay_ms)
    }

    fn staging_dir(&self) -> Option<PathBuf> {
        self.staging.as_ref().and_then(|staging| staging.dir.clone())
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".edhere").join("config.toml"))
}

/// Validate the `EDITOR` value.
///
/// Unset and empty are both `NoEditor`. A value that would not fit a `MAX_PATH`
/// buffer together with its terminator is `EditorTooLong`.
pub fn editor_from_lookup<F>(lookup: F) -> Result<OsString, ErrorKind>
where
    F: Fn(&str) -> Option<OsString>,
{
    let editor = lookup(EDITOR_ENV).ok_or(ErrorKind::NoEditor)?;
    if editor.is_empty() {
        return Err(ErrorKind::NoEditor);
    }
    if os_str_units(&editor) >= MAX_PATH {
        return Err(ErrorKind::EditorTooLong);
    }
    Ok(editor)
}

/// Everything one invocation needs from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub editor: OsString,
    pub capture_delay: Duration,
    /// `None` means the OS temp directory.
    pub staging_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve from the process environment and the config file.
    ///
    /// Config file problems are logged and replaced by defaults; only the
    /// `EDITOR` checks can fail.
    pub fn from_environment() -> Result<Self, ErrorKind> {
        let file = match EdhereConfig::load() {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %e.path().display(), "{e}; using defaults");
                None
            }
        };
        Self::resolve(|name| env::var_os(name), file.as_ref())
    }

    pub fn resolve<F>(lookup: F, file: Option<&EdhereConfig>) -> Result<Self, ErrorKind>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let editor = editor_from_lookup(&lookup)?;

        let mut delay_ms = file.map_or(0, EdhereConfig::delay_ms);
        if let Some(raw) = lookup(DELAY_ENV) {
            match raw.to_str().map(str::trim).map(str::parse::<u64>) {
                Some(Ok(value)) => delay_ms = value,
                _ => tracing::warn!(
                    env_var = DELAY_ENV,
                    "Ignoring non-numeric capture delay override"
                ),
            }
        }

        Ok(Self {
            editor,
            capture_delay: Duration::from_millis(delay_ms),
            staging_dir: file.and_then(EdhereConfig::staging_dir),
        })
    }
}
