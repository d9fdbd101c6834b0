//! Logging setup for the console.
//!
//! Command output owns stdout, so diagnostics go to a log file unless the
//! user asks for stderr with `--log-stderr`.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The per-user log file, truncated on start.
    File,
    /// Standard error, with colors.
    Stderr,
}

impl LogTarget {
    /// Picks the target from the `--log-stderr` flag.
    pub fn from_flag(log_stderr: bool) -> Self {
        if log_stderr {
            Self::Stderr
        } else {
            Self::File
        }
    }
}

/// Installs the global subscriber for `target`.
///
/// The level comes from `RUST_LOG` and defaults to `info`. If the log file
/// cannot be created a warning is printed and logging stays off.
pub fn init_logging(target: LogTarget) {
    let writer = match target {
        LogTarget::Stderr => BoxMakeWriter::new(io::stderr),
        LogTarget::File => match open_log_file() {
            Ok(file) => BoxMakeWriter::new(file),
            Err(e) => {
                eprintln!("Warning: Could not open log file: {e}");
                return;
            }
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(target == LogTarget::Stderr)
        .init();
}

fn open_log_file() -> io::Result<File> {
    let path = get_log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Returns the log file path: `<state dir>/hbnb/hbnb.log`, falling back to the
/// config directory and then the temp directory.
pub fn get_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("hbnb").join("hbnb.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("hbnb.log"))
}
