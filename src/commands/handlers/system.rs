//! System command handlers (help, quit, EOF, unknown input).

use crate::commands::help::{help_for, help_overview};
use crate::commands::output::CommandOutput;
use crate::commands::validation::CommandError;

/// Handle `help [<command>]`.
pub fn handle_help(args: &str) -> CommandOutput {
    let topic = args.split_whitespace().next().unwrap_or("");
    if topic.is_empty() {
        return CommandOutput::info(help_overview());
    }

    match help_for(topic) {
        Some(text) => CommandOutput::info(text),
        None => CommandOutput::error(format!("*** No help on {topic}")),
    }
}

/// Handle `quit`.
pub fn handle_quit() -> CommandOutput {
    CommandOutput::exit()
}

/// Handle end of input: print a blank line, then exit.
pub fn handle_eof() -> CommandOutput {
    CommandOutput::multiple(vec![CommandOutput::info(""), CommandOutput::exit()])
}

/// Handle a line matching no command syntax.
pub fn handle_unknown(line: &str) -> CommandOutput {
    CommandError::UnknownSyntax(line.to_string()).into()
}
