//! Instance command handlers (create, show, destroy, all, count).

use super::{respond, CommandContext};
use crate::commands::output::CommandOutput;
use crate::commands::validation::{optional_class, require_class, require_instance, CommandError};
use crate::models::quote;
use tracing::info;

/// Handle `create <class>`.
pub fn handle_create(ctx: &mut CommandContext<'_>, args: &str) -> CommandOutput {
    respond(create(ctx, args))
}

fn create(ctx: &mut CommandContext<'_>, args: &str) -> Result<CommandOutput, CommandError> {
    let tokens = ctx.lex(args)?;
    let class = require_class(&tokens)?;

    let instance = class.construct();
    let id = instance.id().to_string();
    ctx.store.new_object(instance);
    info!(class = class.name(), %id, "created instance");

    Ok(ctx.persist(CommandOutput::info(id)))
}

/// Handle `show <class> <id>`.
pub fn handle_show(ctx: &mut CommandContext<'_>, args: &str) -> CommandOutput {
    respond(show(ctx, args))
}

fn show(ctx: &CommandContext<'_>, args: &str) -> Result<CommandOutput, CommandError> {
    let tokens = ctx.lex(args)?;
    let target = require_instance(ctx.store, &tokens)?;

    let instance = ctx
        .store
        .get(target.class, target.id)
        .ok_or(CommandError::InstanceNotFound)?;
    Ok(CommandOutput::info(instance.to_string()))
}

/// Handle `destroy <class> <id>`.
pub fn handle_destroy(ctx: &mut CommandContext<'_>, args: &str) -> CommandOutput {
    respond(destroy(ctx, args))
}

fn destroy(ctx: &mut CommandContext<'_>, args: &str) -> Result<CommandOutput, CommandError> {
    let tokens = ctx.lex(args)?;
    let target = require_instance(ctx.store, &tokens)?;

    ctx.store.remove(target.class, target.id);
    info!(class = target.class.name(), id = target.id, "destroyed instance");

    Ok(ctx.persist(CommandOutput::None))
}

/// Handle `all [<class>]`.
///
/// Prints one list of representations, quoted, even when it is empty.
pub fn handle_all(ctx: &mut CommandContext<'_>, args: &str) -> CommandOutput {
    respond(all(ctx, args))
}

fn all(ctx: &CommandContext<'_>, args: &str) -> Result<CommandOutput, CommandError> {
    let tokens = ctx.lex(args)?;
    let class = optional_class(&tokens)?;

    let items: Vec<String> = ctx
        .store
        .all()
        .values()
        .filter(|obj| class.map_or(true, |class| obj.class() == class))
        .map(|obj| quote(&obj.to_string()))
        .collect();

    Ok(CommandOutput::info(format!("[{}]", items.join(", "))))
}

/// Handle `count <class>`.
pub fn handle_count(ctx: &mut CommandContext<'_>, args: &str) -> CommandOutput {
    respond(count(ctx, args))
}

fn count(ctx: &CommandContext<'_>, args: &str) -> Result<CommandOutput, CommandError> {
    let tokens = ctx.lex(args)?;
    let class = require_class(&tokens)?;
    Ok(CommandOutput::info(ctx.store.count(class).to_string()))
}
