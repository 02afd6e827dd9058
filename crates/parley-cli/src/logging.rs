//! Logging initialization.
//!
//! Structured logging via `tracing`, rendered as human-readable text or
//! newline-delimited JSON. `PARLEY_LOG` overrides the verbosity flags.

use std::fs::File;
use std::io::IsTerminal;
use std::sync::Mutex;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "PARLEY_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

/// Where log lines are written.
#[derive(Debug)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// An open log file.
    File(File),
    /// Nowhere. Used while the terminal UI owns the screen.
    Discard,
}

/// Maps a `-v` count to a tracing directive.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"`
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(format: LogFormat, verbosity: u8, target: LogTarget) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));
    let show_target = verbosity >= 2;

    let use_ansi = matches!(target, LogTarget::Stderr)
        && std::io::stderr().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    let writer = match target {
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogTarget::File(file) => BoxMakeWriter::new(Mutex::new(file)),
        LogTarget::Discard => BoxMakeWriter::new(std::io::sink),
    };

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_ansi)
                .with_target(show_target)
                .with_writer(writer)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(show_target)
                .with_writer(writer)
                .try_init();
        }
    }
}
