//! Command definitions for declarative command metadata.
//!
//! Every console command is described once here; the help output is built
//! from this table.

/// Definition of a command.
#[derive(Debug, Clone)]
pub struct CommandDef {
    /// Primary command name.
    pub name: &'static str,
    /// Alternative names for the command.
    pub aliases: &'static [&'static str],
    /// Short description shown in help.
    pub description: &'static str,
    /// Usage lines, canonical form first.
    pub usage: &'static [&'static str],
    /// Whether the command writes the store.
    pub mutates_store: bool,
}

/// All command definitions, sorted by name.
pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "EOF",
        aliases: &[],
        description: "End of input (Ctrl+D) exits the program.",
        usage: &["EOF"],
        mutates_store: false,
    },
    CommandDef {
        name: "all",
        aliases: &[],
        description: "Display string representations of all instances of a given class.\n\
                      If no class is specified, displays all instantiated objects.",
        usage: &["all", "all <class>", "<class>.all()"],
        mutates_store: false,
    },
    CommandDef {
        name: "count",
        aliases: &[],
        description: "Retrieve the number of instances of a given class.",
        usage: &["count <class>", "<class>.count()"],
        mutates_store: false,
    },
    CommandDef {
        name: "create",
        aliases: &[],
        description: "Create a new class instance and print its id.",
        usage: &["create <class>"],
        mutates_store: true,
    },
    CommandDef {
        name: "destroy",
        aliases: &[],
        description: "Delete a class instance of a given id.",
        usage: &["destroy <class> <id>", "<class>.destroy(<id>)"],
        mutates_store: true,
    },
    CommandDef {
        name: "help",
        aliases: &["?"],
        description: "List available commands, or show help for one command.",
        usage: &["help", "help <command>"],
        mutates_store: false,
    },
    CommandDef {
        name: "quit",
        aliases: &[],
        description: "Quit command to exit the program.",
        usage: &["quit"],
        mutates_store: false,
    },
    CommandDef {
        name: "show",
        aliases: &[],
        description: "Display the string representation of a class instance of a given id.",
        usage: &["show <class> <id>", "<class>.show(<id>)"],
        mutates_store: false,
    },
    CommandDef {
        name: "update",
        aliases: &[],
        description: "Update a class instance of a given id by adding or updating\n\
                      a given attribute key/value pair or dictionary.",
        usage: &[
            "update <class> <id> <attribute_name> <attribute_value>",
            "<class>.update(<id>, <attribute_name>, <attribute_value>)",
            "<class>.update(<id>, <dictionary>)",
        ],
        mutates_store: true,
    },
];

/// Finds a command definition by name or alias.
pub fn find_command(name: &str) -> Option<&'static CommandDef> {
    COMMANDS
        .iter()
        .find(|def| def.name == name || def.aliases.contains(&name))
}
