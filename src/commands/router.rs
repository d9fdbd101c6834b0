//! Command parsing and routing for the console.
//!
//! Parses a raw input line into a [`Command`]. Canonical lines
//! (`show User 1234`) and dotted-call lines (`User.show(1234)`) produce the
//! same variant carrying the same argument string, so every handler sees one
//! input shape regardless of the syntax used.

use regex::Regex;
use std::sync::LazyLock;

static CALL_ARGUMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("valid call regex"));

/// Parsed command with its raw argument string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line, nothing to do.
    Empty,
    /// Create an instance: `create <Class>`.
    Create(String),
    /// Show an instance: `show <Class> <id>`.
    Show(String),
    /// Delete an instance: `destroy <Class> <id>`.
    Destroy(String),
    /// List instances: `all [<Class>]`.
    All(String),
    /// Count instances of a class: `count <Class>`.
    Count(String),
    /// Set attributes: `update <Class> <id> <attr> <value>` or with a mapping.
    Update(String),
    /// Show help, optionally for one command.
    Help(String),
    /// Exit the console.
    Quit,
    /// End of input.
    Eof,
    /// Input matching no known syntax. Carries the whole line.
    Unknown(String),
}

impl Command {
    /// Returns the command name used for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Empty => "empty",
            Command::Create(_) => "create",
            Command::Show(_) => "show",
            Command::Destroy(_) => "destroy",
            Command::All(_) => "all",
            Command::Count(_) => "count",
            Command::Update(_) => "update",
            Command::Help(_) => "help",
            Command::Quit => "quit",
            Command::Eof => "EOF",
            Command::Unknown(_) => "unknown",
        }
    }
}

/// Command router for parsing user input.
pub struct CommandRouter;

impl CommandRouter {
    /// Parse a line of user input into a Command.
    pub fn parse(input: &str) -> Command {
        let line = input.trim();

        if line.is_empty() {
            return Command::Empty;
        }

        if let Some(rest) = line.strip_prefix('?') {
            return Command::Help(rest.trim().to_string());
        }

        let word_end = line
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(line.len());
        let (word, rest) = line.split_at(word_end);
        let args = rest.trim().to_string();

        match word {
            "create" => Command::Create(args),
            "show" => Command::Show(args),
            "destroy" => Command::Destroy(args),
            "all" => Command::All(args),
            "count" => Command::Count(args),
            "update" => Command::Update(args),
            "help" => Command::Help(args),
            "quit" => Command::Quit,
            "EOF" => Command::Eof,
            _ => Self::parse_dotted(line),
        }
    }

    /// Parse `<Class>.<method>(<args>)` into the canonical command.
    ///
    /// The argument text inside the parentheses is passed on untouched,
    /// prefixed by the class name.
    fn parse_dotted(line: &str) -> Command {
        let Some((class_name, method_part)) = line.split_once('.') else {
            return Command::Unknown(line.to_string());
        };
        let Some(call) = CALL_ARGUMENTS.captures(method_part) else {
            return Command::Unknown(line.to_string());
        };

        let (Some(whole), Some(inner)) = (call.get(0), call.get(1)) else {
            return Command::Unknown(line.to_string());
        };
        let method = &method_part[..whole.start()];
        let args = format!("{} {}", class_name, inner.as_str());

        match method {
            "all" => Command::All(args),
            "show" => Command::Show(args),
            "destroy" => Command::Destroy(args),
            "count" => Command::Count(args),
            "update" => Command::Update(args),
            _ => Command::Unknown(line.to_string()),
        }
    }
}
