//! Help text for console commands.

use super::definitions::{find_command, CommandDef, COMMANDS};

/// Header of the command listing.
pub const HELP_HEADER: &str = "Documented commands (type help <topic>):";

/// Builds the listing shown by a bare `help`.
pub fn help_overview() -> String {
    let names: Vec<&str> = COMMANDS.iter().map(|def| def.name).collect();
    format!(
        "\n{HELP_HEADER}\n{}\n{}\n",
        "=".repeat(HELP_HEADER.len()),
        names.join("  ")
    )
}

/// Builds the help for one command, or `None` if the command is unknown.
pub fn help_for(name: &str) -> Option<String> {
    find_command(name).map(format_command)
}

fn format_command(def: &CommandDef) -> String {
    let mut text = String::from("Usage: ");
    text.push_str(&def.usage.join(" or\n       "));
    text.push('\n');
    text.push_str(def.description);
    text
}
