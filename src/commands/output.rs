//! Command output types.
//!
//! Handlers return a [`CommandOutput`] instead of printing. The console turns
//! it into lines on its writer and acts on any control action.

use super::validation::CommandError;
use std::io::{self, Write};

/// Output from a command handler.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Nothing to print.
    None,

    /// Regular output line (an id, a representation, a count...).
    Info(String),

    /// Diagnostic line.
    Error(String),

    /// Loop control action.
    Control(ControlAction),

    /// Multiple outputs, in order.
    Multiple(Vec<CommandOutput>),
}

/// Control actions that affect the REPL loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Stop reading input.
    Exit,
}

impl CommandOutput {
    /// Creates an info line.
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    /// Creates a diagnostic line.
    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    /// Creates a multiple output from a vector.
    pub fn multiple(outputs: Vec<CommandOutput>) -> Self {
        Self::Multiple(outputs)
    }

    /// Creates an exit control action.
    pub fn exit() -> Self {
        Self::Control(ControlAction::Exit)
    }

    /// Returns true if this output (or any part of it) ends the loop.
    pub fn is_exit(&self) -> bool {
        match self {
            Self::Control(ControlAction::Exit) => true,
            Self::Multiple(outputs) => outputs.iter().any(Self::is_exit),
            _ => false,
        }
    }

    /// Writes the printable parts, one per line.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Self::None | Self::Control(_) => Ok(()),
            Self::Info(line) | Self::Error(line) => writeln!(out, "{line}"),
            Self::Multiple(outputs) => outputs.iter().try_for_each(|o| o.write_to(out)),
        }
    }
}

impl From<CommandError> for CommandOutput {
    fn from(err: CommandError) -> Self {
        Self::Error(err.to_string())
    }
}
