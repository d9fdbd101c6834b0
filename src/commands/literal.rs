//! Literal parser for mapping and sequence arguments.
//!
//! Accepts a small, closed literal grammar and never evaluates anything:
//!
//! ```text
//! value   := string | number | "True" | "False" | "None" | list | mapping
//! string  := '...' | "..."            (backslash escapes: \n \t \r \\ \' \")
//! number  := [+-] digits [. digits] [(e|E) [+-] digits]
//! list    := "[" [value ("," value)* [","]] "]"
//!          | "(" [value ("," value)* [","]] ")"
//! mapping := "{" [key ":" value ("," key ":" value)* [","]] "}"
//! key     := string | number
//! ```

use serde_json::{Map, Number, Value};
use std::iter::Peekable;
use std::str::CharIndices;

/// Deepest list or mapping nesting accepted.
pub const MAX_NESTING: usize = 64;

/// Literal parse failure with the byte offset it occurred at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    /// Byte offset into the literal text.
    pub position: usize,
    /// What went wrong.
    pub message: String,
}

impl LiteralError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LiteralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

impl std::error::Error for LiteralError {}

/// Parses literal text into a value.
pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(text);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some((pos, c)) => Err(LiteralError::new(pos, format!("unexpected '{c}'"))),
    }
}

/// Parses literal text that must be a mapping.
pub fn parse_mapping(text: &str) -> Result<Map<String, Value>, LiteralError> {
    match parse_literal(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(LiteralError::new(0, "expected a mapping")),
    }
}

struct Parser<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
            depth: 0,
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn offset(&mut self) -> usize {
        self.peek().map(|(pos, _)| pos).unwrap_or(self.text.len())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|(_, c)| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), LiteralError> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, c)) if c == wanted => Ok(()),
            Some((pos, c)) => Err(LiteralError::new(
                pos,
                format!("expected '{wanted}', found '{c}'"),
            )),
            None => Err(LiteralError::new(
                self.text.len(),
                format!("expected '{wanted}', found end of input"),
            )),
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_whitespace();
        let (pos, c) = self
            .peek()
            .ok_or_else(|| LiteralError::new(self.text.len(), "unexpected end of input"))?;

        match c {
            '\'' | '"' => self.parse_string().map(Value::String),
            '[' => self.nested(pos, |p| p.parse_sequence('[', ']')),
            '(' => self.nested(pos, |p| p.parse_sequence('(', ')')),
            '{' => self.nested(pos, |p| p.parse_mapping().map(Value::Object)),
            '+' | '-' | '.' | '0'..='9' => self.parse_number(),
            c if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                match word.as_str() {
                    "True" => Ok(Value::Bool(true)),
                    "False" => Ok(Value::Bool(false)),
                    "None" => Ok(Value::Null),
                    other => Err(LiteralError::new(pos, format!("unknown name '{other}'"))),
                }
            }
            c => Err(LiteralError::new(pos, format!("unexpected '{c}'"))),
        }
    }

    /// Runs `parse` one nesting level deeper.
    fn nested(
        &mut self,
        pos: usize,
        parse: impl FnOnce(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_NESTING {
            return Err(LiteralError::new(
                pos,
                format!("nesting deeper than {MAX_NESTING} levels"),
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_string(&mut self) -> Result<String, LiteralError> {
        let (start, quote) = self
            .chars
            .next()
            .ok_or_else(|| LiteralError::new(self.text.len(), "expected a string"))?;
        let mut out = String::new();

        while let Some((_, c)) = self.chars.next() {
            match c {
                c if c == quote => return Ok(out),
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, escaped @ ('\\' | '\'' | '"'))) => out.push(escaped),
                    Some((_, other)) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => break,
                },
                c => out.push(c),
            }
        }

        Err(LiteralError::new(start, "unterminated string"))
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.offset();
        let text = self.take_while(|c| {
            c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | '_')
        });
        let digits = text.replace('_', "");

        let is_float = digits.contains(['.', 'e', 'E']);
        if !is_float {
            if let Ok(n) = digits.parse::<i64>() {
                return Ok(Value::Number(n.into()));
            }
        }

        digits
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| LiteralError::new(start, format!("invalid number '{text}'")))
    }

    fn parse_sequence(&mut self, open: char, close: char) -> Result<Value, LiteralError> {
        self.expect(open)?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek().is_some_and(|(_, c)| c == close) {
                self.chars.next();
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            if !self.comma_or_close(close)? {
                return Ok(Value::Array(items));
            }
        }
    }

    fn parse_mapping(&mut self) -> Result<Map<String, Value>, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();

        loop {
            self.skip_whitespace();
            if self.peek().is_some_and(|(_, c)| c == '}') {
                self.chars.next();
                return Ok(map);
            }
            let key = self.parse_key()?;
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            if !self.comma_or_close('}')? {
                return Ok(map);
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, LiteralError> {
        let pos = self.offset();
        match self.parse_value()? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(LiteralError::new(pos, "mapping keys must be strings or numbers")),
        }
    }

    /// Consumes a separator. Returns false when the closing delimiter was hit.
    fn comma_or_close(&mut self, close: char) -> Result<bool, LiteralError> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, ',')) => Ok(true),
            Some((_, c)) if c == close => Ok(false),
            Some((pos, c)) => Err(LiteralError::new(
                pos,
                format!("expected ',' or '{close}', found '{c}'"),
            )),
            None => Err(LiteralError::new(
                self.text.len(),
                format!("expected '{close}', found end of input"),
            )),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some((_, c)) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.chars.next();
        }
        out
    }
}
