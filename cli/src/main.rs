//! edhere - binary entry point.
//!
//! One invocation edits one field:
//!
//! ```text
//! main() -> Settings::from_environment() -> [capture delay] -> Roundtrip::run()
//!                                                                  |
//!                         Ok(Outcome) -> exit 0 / 1   |   Err(FatalError) -> message, exit 1
//! ```
//!
//! Bind it to a hotkey; it acts on whatever field has focus when it starts.

// No console window flashes up when started from a hotkey.
#![cfg_attr(windows, windows_subsystem = "windows")]

use std::{
    env,
    fs::{self, File, OpenOptions},
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
    thread,
};

use edhere_config::{Settings, config_path};
use edhere_core::{ProcessLauncher, Prompter, Roundtrip, StagingStore};
use edhere_desktop::{PlatformPrompter, PlatformResolver};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No console to fall back to on Windows; run without an output layer.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.edhere/logs/edhere.log
    if let Some(config_path) = config_path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("edhere.log"));
    }

    // Fallback: <temp>/edhere/edhere.log (no usable home directory)
    candidates.push(env::temp_dir().join("edhere").join("edhere.log"));

    candidates
}

fn main() -> ExitCode {
    init_tracing();
    let prompter = PlatformPrompter::default();

    let settings = match Settings::from_environment() {
        Ok(settings) => settings,
        Err(kind) => {
            tracing::error!(kind = kind.as_str(), "Editor setting rejected");
            prompter.warn(kind);
            return ExitCode::FAILURE;
        }
    };

    if !settings.capture_delay.is_zero() {
        tracing::debug!(
            delay_ms = settings.capture_delay.as_millis() as u64,
            "Waiting before capturing focus"
        );
        thread::sleep(settings.capture_delay);
    }

    let resolver = PlatformResolver::default();
    let launcher = ProcessLauncher;
    let store = StagingStore::new(settings.staging_dir.clone());
    let roundtrip = Roundtrip::new(
        &resolver,
        &launcher,
        &prompter,
        &store,
        &settings.editor,
    );

    match roundtrip.run() {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(fatal) => {
            prompter.warn(fatal.kind);
            ExitCode::FAILURE
        }
    }
}
