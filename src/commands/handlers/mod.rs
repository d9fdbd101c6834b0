//! Command handlers for the console.
//!
//! Each handler takes the command context and its raw argument string, lexes
//! the arguments itself and returns a [`CommandOutput`].

pub mod entities;
pub mod system;
pub mod update;

use super::lexer::{lex, Token};
use super::output::CommandOutput;
use super::validation::CommandError;
use crate::persistence::FileStorage;
use tracing::{debug, error};

/// Context provided to command handlers.
pub struct CommandContext<'a> {
    /// Object store the command reads and mutates.
    pub store: &'a mut FileStorage,
    /// The input line being executed, as typed.
    pub line: &'a str,
}

impl<'a> CommandContext<'a> {
    /// Creates a context for one input line.
    pub fn new(store: &'a mut FileStorage, line: &'a str) -> Self {
        Self { store, line }
    }

    /// Lexes handler arguments. A lexing failure makes the whole line
    /// unknown syntax.
    pub fn lex(&self, args: &str) -> Result<Vec<Token>, CommandError> {
        lex(args).map_err(|e| {
            debug!(line = self.line, "lexing failed: {e}");
            CommandError::UnknownSyntax(self.line.to_string())
        })
    }

    /// Saves the store after a mutation.
    ///
    /// Returns `output` unchanged on success, followed by a diagnostic line
    /// when the save fails.
    pub fn persist(&mut self, output: CommandOutput) -> CommandOutput {
        match self.store.save() {
            Ok(()) => output,
            Err(e) => {
                error!("{}: {}", e.category(), e);
                CommandOutput::multiple(vec![output, CommandOutput::error(format!("*** {e}"))])
            }
        }
    }
}

/// Flattens a handler result into its output.
fn respond(result: Result<CommandOutput, CommandError>) -> CommandOutput {
    result.unwrap_or_else(CommandOutput::from)
}
