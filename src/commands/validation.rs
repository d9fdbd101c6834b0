//! Argument validation shared by the data handlers.
//!
//! Checks run in a fixed order and the first failure wins: class name
//! present, class known, id present, instance exists, attribute present,
//! value present.

use super::lexer::Token;
use crate::models::EntityClass;
use crate::persistence::FileStorage;
use thiserror::Error;

/// Diagnostic shown to the user when a command cannot run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("** class name missing **")]
    MissingClassName,

    #[error("** class doesn't exist **")]
    UnknownClass,

    #[error("** instance id missing **")]
    MissingInstanceId,

    #[error("** no instance found **")]
    InstanceNotFound,

    #[error("** attribute name missing **")]
    MissingAttributeName,

    #[error("** value missing **")]
    MissingValue,

    /// The whole input line matched no command syntax.
    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),
}

/// A located, existing instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target<'t> {
    pub class: EntityClass,
    pub id: &'t str,
}

/// What an `update` asks to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment<'t> {
    /// One attribute with its value token.
    Single { name: &'t str, value: &'t Token },
    /// A mapping literal, still unparsed.
    Mapping(&'t str),
}

/// Requires a known class as the first token.
pub fn require_class(tokens: &[Token]) -> Result<EntityClass, CommandError> {
    let name = tokens.first().ok_or(CommandError::MissingClassName)?;
    EntityClass::from_name(name.as_str()).ok_or(CommandError::UnknownClass)
}

/// Accepts no class at all, or requires the first token to be known.
pub fn optional_class(tokens: &[Token]) -> Result<Option<EntityClass>, CommandError> {
    if tokens.is_empty() {
        return Ok(None);
    }
    require_class(tokens).map(Some)
}

/// Requires a known class and an id naming an existing instance.
pub fn require_instance<'t>(
    store: &FileStorage,
    tokens: &'t [Token],
) -> Result<Target<'t>, CommandError> {
    let class = require_class(tokens)?;
    let id = tokens
        .get(1)
        .map(Token::as_str)
        .ok_or(CommandError::MissingInstanceId)?;

    if store.get(class, id).is_none() {
        return Err(CommandError::InstanceNotFound);
    }
    Ok(Target { class, id })
}

/// Extracts the attribute assignment following class and id.
///
/// A lone third token is accepted only as a mapping literal. Tokens after the
/// value are ignored.
pub fn require_assignment(tokens: &[Token]) -> Result<Assignment<'_>, CommandError> {
    match tokens.get(2..).unwrap_or_default() {
        [] => Err(CommandError::MissingAttributeName),
        [Token::Mapping(literal), ..] => Ok(Assignment::Mapping(literal)),
        [_] => Err(CommandError::MissingValue),
        [name, value, ..] => Ok(Assignment::Single {
            name: name.as_str(),
            value,
        }),
    }
}
