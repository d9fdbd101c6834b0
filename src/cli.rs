//! Command-line argument parsing for the console.
//!
//! Uses clap to parse process arguments.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Where commands are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// The terminal, with a prompt when it is interactive.
    Terminal,
    /// Standard input as a script, no prompt.
    Stdin,
    /// A script file, no prompt.
    File(PathBuf),
}

/// Interactive command interpreter for the HBnB object store.
#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store file path (overrides the config file)
    #[arg(short = 'f', long, value_name = "PATH", env = "HBNB_FILE")]
    pub file: Option<PathBuf>,

    /// Read commands from a script file (use "-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Write logs to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns the store path: --file first, then the config file value.
    pub fn store_path(&self, config: &Config) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| config.storage.path.clone())
    }

    /// Returns where commands should be read from.
    pub fn input_source(&self) -> InputSource {
        match self.script.as_deref() {
            None => InputSource::Terminal,
            Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(PathBuf::from(path)),
        }
    }
}
