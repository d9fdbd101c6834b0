//! The interactive command loop.
//!
//! Reads one line at a time, routes it to a handler and writes the handler's
//! output. The loop owns the object store and lends it to each command.

use crate::commands::definitions::find_command;
use crate::commands::{dispatch, Command, CommandContext, CommandOutput, CommandRouter};
use crate::error::Result;
use crate::persistence::FileStorage;
use std::borrow::Cow;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Default prompt shown before each line.
pub const DEFAULT_PROMPT: &str = "(hbnb) ";

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    /// Waiting for the next line.
    AwaitingInput,
    /// Running a command.
    Dispatching,
    /// `quit` or end of input was seen.
    Terminated,
}

/// Command interpreter over an object store.
pub struct Console {
    store: FileStorage,
    prompt: Option<String>,
    state: ReplState,
}

impl Console {
    /// Creates a console with no prompt.
    pub fn new(store: FileStorage) -> Self {
        Self {
            store,
            prompt: None,
            state: ReplState::AwaitingInput,
        }
    }

    /// Shows `prompt` before each line read.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Returns the object store.
    pub fn store(&self) -> &FileStorage {
        &self.store
    }

    /// Returns the loop state.
    pub fn state(&self) -> ReplState {
        self.state
    }

    /// Executes one input line.
    pub fn execute(&mut self, line: &str) -> CommandOutput {
        let command = CommandRouter::parse(line);
        self.execute_command(&command, line.trim())
    }

    fn execute_command(&mut self, command: &Command, line: &str) -> CommandOutput {
        self.state = ReplState::Dispatching;
        let mutates = find_command(command.name()).is_some_and(|def| def.mutates_store);
        debug!(command = command.name(), mutates, line, "dispatching");

        let mut ctx = CommandContext::new(&mut self.store, line);
        let output = dispatch(command, &mut ctx);

        self.state = if output.is_exit() {
            ReplState::Terminated
        } else {
            ReplState::AwaitingInput
        };
        output
    }

    /// Runs the loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<()> {
        info!(objects = self.store.all().len(), "console started");

        while self.state != ReplState::Terminated {
            if let Some(prompt) = &self.prompt {
                write!(output, "{prompt}")?;
                output.flush()?;
            }

            let mut buf = Vec::new();
            let result = if input.read_until(b'\n', &mut buf)? == 0 {
                self.execute_command(&Command::Eof, "EOF")
            } else {
                // Invalid UTF-8 becomes U+FFFD and fails like any unknown word
                let line = String::from_utf8_lossy(&buf);
                if let Cow::Owned(_) = line {
                    debug!("input line is not valid UTF-8");
                }
                self.execute(line.trim_end_matches(['\n', '\r']))
            };

            result.write_to(output)?;
            output.flush()?;
        }

        info!("console terminated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn console() -> (Console, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = FileStorage::open(dir.path().join("file.json")).unwrap();
        (Console::new(store), dir)
    }

    #[test]
    fn test_execute_returns_to_awaiting_input() {
        let (mut console, _dir) = console();
        console.execute("count User");
        assert_eq!(console.state(), ReplState::AwaitingInput);
        console.execute("nonsense");
        assert_eq!(console.state(), ReplState::AwaitingInput);
    }

    #[test]
    fn test_quit_terminates() {
        let (mut console, _dir) = console();
        assert!(console.execute("quit").is_exit());
        assert_eq!(console.state(), ReplState::Terminated);
    }

    #[test]
    fn test_run_stops_at_quit() {
        let (mut console, _dir) = console();
        let mut out = Vec::new();
        console
            .run("count User\nquit\ncount User\n".as_bytes(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n");
    }

    #[test]
    fn test_run_end_of_input_prints_blank_line() {
        let (mut console, _dir) = console();
        let mut out = Vec::new();
        console.run("".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n");
        assert_eq!(console.state(), ReplState::Terminated);
    }

    #[test]
    fn test_run_with_prompt() {
        let dir = tempdir().unwrap();
        let store = FileStorage::open(dir.path().join("file.json")).unwrap();
        let mut console = Console::new(store).with_prompt(DEFAULT_PROMPT);
        let mut out = Vec::new();
        console.run("\r\nquit\n".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(hbnb) (hbnb) ");
    }

    #[test]
    fn test_run_survives_invalid_utf8() {
        let (mut console, _dir) = console();
        let mut out = Vec::new();
        console
            .run(&b"create \xff\xfe\ncount User\nquit\n"[..], &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "** class doesn't exist **\n0\n"
        );
        assert_eq!(console.state(), ReplState::Terminated);
    }

    #[test]
    fn test_failed_save_reports_and_continues() {
        let dir = tempdir().unwrap();
        let parent = dir.path().join("store");
        let store = FileStorage::open(parent.join("file.json")).unwrap();
        // A regular file where the store directory should be
        std::fs::write(&parent, "not a directory").unwrap();
        let mut console = Console::new(store);

        let mut out = Vec::new();
        console.execute("create User").write_to(&mut out).unwrap();
        assert_eq!(console.state(), ReplState::AwaitingInput);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "output: {text}");
        assert_eq!(lines[0].len(), 36);
        assert!(lines[1].starts_with("*** Storage error: "), "output: {text}");

        let mut out = Vec::new();
        console
            .run("count User\nquit\n".as_bytes(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n");
    }
}
