//! Lexer for command arguments.
//!
//! Splits an argument string into tokens with shell-style quoting:
//! - Whitespace-separated words
//! - Single-quoted strings: `'hello world'` → `hello world` (no escapes)
//! - Double-quoted strings with `\"`, `\\`, `\$` and `` \` `` escapes
//! - Backslash escapes outside quotes
//! - Trailing commas stripped from every word
//!
//! The first `{...}` (or, failing that, the first `[...]`) in the input is kept
//! verbatim as a single final token. Anything after it is ignored.

use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::LazyLock;

static MAPPING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{.*?\}").expect("valid mapping regex"));
static SEQUENCE_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("valid sequence regex"));

/// A token lexed from command arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A plain word, unquoted.
    Word(String),
    /// A brace-delimited literal, braces included.
    Mapping(String),
    /// A bracket-delimited literal, brackets included.
    Sequence(String),
}

impl Token {
    /// Returns the token text.
    pub fn as_str(&self) -> &str {
        match self {
            Token::Word(s) | Token::Mapping(s) | Token::Sequence(s) => s,
        }
    }

    /// Returns true if this is a mapping literal.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Token::Mapping(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A quote was opened and never closed.
    UnterminatedQuote(char),
    /// Input ended right after a backslash.
    TrailingEscape,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnterminatedQuote(q) => write!(f, "no closing quotation ({q})"),
            LexError::TrailingEscape => write!(f, "no escaped character"),
        }
    }
}

impl std::error::Error for LexError {}

/// Lexes a command argument string.
///
/// ```
/// use hbnb_console::commands::lexer::{lex, Token};
///
/// let tokens = lex(r#"User 1234, {'name': "Betty"}"#).unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Word("User".into()),
///         Token::Word("1234".into()),
///         Token::Mapping(r#"{'name': "Betty"}"#.into()),
///     ]
/// );
/// ```
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    if let Some(found) = MAPPING_LITERAL.find(input) {
        let mut tokens = split_words(&input[..found.start()])?;
        tokens.push(Token::Mapping(found.as_str().to_string()));
        return Ok(tokens);
    }

    if let Some(found) = SEQUENCE_LITERAL.find(input) {
        let mut tokens = split_words(&input[..found.start()])?;
        tokens.push(Token::Sequence(found.as_str().to_string()));
        return Ok(tokens);
    }

    split_words(input)
}

/// Shell-splits text into words and strips trailing commas.
fn split_words(input: &str) -> Result<Vec<Token>, LexError> {
    Ok(shell_split(input)?
        .into_iter()
        .map(|word| Token::Word(word.trim_end_matches(',').to_string()))
        .collect())
}

/// Splits text the way a POSIX shell splits a command line.
pub fn shell_split(input: &str) -> Result<Vec<String>, LexError> {
    let mut words = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        // Skip whitespace
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }
        words.push(collect_word(&mut chars)?);
    }

    Ok(words)
}

/// Collects one word, joining adjacent quoted and unquoted pieces.
fn collect_word(chars: &mut Peekable<Chars<'_>>) -> Result<String, LexError> {
    let mut word = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        chars.next();

        match c {
            '\'' => collect_single_quoted(chars, &mut word)?,
            '"' => collect_double_quoted(chars, &mut word)?,
            '\\' => word.push(chars.next().ok_or(LexError::TrailingEscape)?),
            c => word.push(c),
        }
    }

    Ok(word)
}

fn collect_single_quoted(chars: &mut Peekable<Chars<'_>>, word: &mut String) -> Result<(), LexError> {
    for c in chars.by_ref() {
        if c == '\'' {
            return Ok(());
        }
        word.push(c);
    }
    Err(LexError::UnterminatedQuote('\''))
}

fn collect_double_quoted(chars: &mut Peekable<Chars<'_>>, word: &mut String) -> Result<(), LexError> {
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(()),
            '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\' | '$' | '`')) => word.push(escaped),
                Some(other) => {
                    // Unknown escape, keep as-is
                    word.push('\\');
                    word.push(other);
                }
                None => break,
            },
            c => word.push(c),
        }
    }
    Err(LexError::UnterminatedQuote('"'))
}
