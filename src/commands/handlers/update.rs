//! Update command handler.
//!
//! `update <class> <id> <attr> <value>` sets one attribute;
//! `update <class> <id> {<mapping>}` sets every pair of the mapping. Values for
//! attributes the class declares as scalars are coerced to the declared kind.

use super::{respond, CommandContext};
use crate::commands::lexer::Token;
use crate::commands::literal::{parse_literal, parse_mapping};
use crate::commands::output::CommandOutput;
use crate::commands::validation::{
    require_assignment, require_instance, Assignment, CommandError,
};
use serde_json::Value;
use tracing::{debug, info};

/// Handle `update`.
pub fn handle_update(ctx: &mut CommandContext<'_>, args: &str) -> CommandOutput {
    respond(update(ctx, args))
}

fn update(ctx: &mut CommandContext<'_>, args: &str) -> Result<CommandOutput, CommandError> {
    let tokens = ctx.lex(args)?;
    let target = require_instance(ctx.store, &tokens)?;
    let assignment = require_assignment(&tokens)?;

    let pairs: Vec<(String, Value)> = match assignment {
        Assignment::Single { name, value } => vec![(name.to_string(), single_value(value))],
        Assignment::Mapping(literal) => parse_mapping(literal)
            .map_err(|e| {
                debug!(literal, "mapping literal rejected: {e}");
                CommandError::MissingValue
            })?
            .into_iter()
            .collect(),
    };

    let instance = ctx
        .store
        .get_mut(target.class, target.id)
        .ok_or(CommandError::InstanceNotFound)?;

    let mut applied = 0;
    for (name, value) in pairs {
        let value = target.class.coerce(&name, value);
        if instance.set(name.as_str(), value) {
            applied += 1;
        } else {
            debug!(attribute = %name, "skipping read-only attribute");
        }
    }
    instance.touch();

    info!(
        class = target.class.name(),
        id = target.id,
        applied,
        "updated instance"
    );
    Ok(ctx.persist(CommandOutput::None))
}

/// Turns the value token of a single assignment into a value.
///
/// Words stay text. A sequence literal becomes a list when it parses, else
/// it stays text too.
fn single_value(token: &Token) -> Value {
    match token {
        Token::Sequence(literal) => {
            parse_literal(literal).unwrap_or_else(|_| Value::String(literal.clone()))
        }
        other => Value::String(other.as_str().to_string()),
    }
}
