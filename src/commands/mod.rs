//! Command parsing and dispatch for the console.
//!
//! Parsing (router, lexer, literal parser) is kept apart from execution
//! (handlers), so command parsing can be tested without a store.

pub mod definitions;
pub mod handlers;
pub mod help;
pub mod lexer;
pub mod literal;
pub mod output;
pub mod router;
pub mod validation;

pub use definitions::{CommandDef, COMMANDS};
pub use handlers::CommandContext;
pub use lexer::{lex, LexError, Token};
pub use output::{CommandOutput, ControlAction};
pub use router::{Command, CommandRouter};
pub use validation::CommandError;

/// Runs a parsed command against its context.
pub fn dispatch(command: &Command, ctx: &mut CommandContext<'_>) -> CommandOutput {
    use handlers::{entities, system, update};

    match command {
        Command::Empty => CommandOutput::None,
        Command::Create(args) => entities::handle_create(ctx, args),
        Command::Show(args) => entities::handle_show(ctx, args),
        Command::Destroy(args) => entities::handle_destroy(ctx, args),
        Command::All(args) => entities::handle_all(ctx, args),
        Command::Count(args) => entities::handle_count(ctx, args),
        Command::Update(args) => update::handle_update(ctx, args),
        Command::Help(args) => system::handle_help(args),
        Command::Quit => system::handle_quit(),
        Command::Eof => system::handle_eof(),
        Command::Unknown(line) => system::handle_unknown(line),
    }
}
