// src/core/transformer.rs
//! Line-by-line rewrite of `json!({ "<key>": <value>, ... });` blocks
//!
//! The grammar is deliberately narrow:
//! - `json!({` opens the block and becomes `vec![`
//! - `});` closes it and becomes `];`
//! - every other line must be `"<key>": <value>` and becomes
//!   `    (<key>, GDValue::Int(<value>)),`
//!
//! Surrounding whitespace and trailing commas are ignored. A single line that
//! fits none of these shapes rejects the whole input.

use crate::error::{ParseFailure, TransformParseError};

pub const OPEN_MARKER: &str = "json!({";
pub const CLOSE_MARKER: &str = "});";
const OPEN_TOKEN: &str = "vec![\n";
const CLOSE_TOKEN: &str = "];";

const SEPARATOR: &str = "\": ";

/// Successful output or the reason the input was rejected
pub type TransformResult = Result<String, TransformParseError>;

/// One recognised input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Open,
    Close,
    Entry { key: &'a str, value: &'a str },
}

impl<'a> Line<'a> {
    /// Classify a line that has already been stripped of whitespace and
    /// trailing commas.
    pub fn parse(stripped: &'a str) -> Result<Self, ParseFailure> {
        match stripped {
            OPEN_MARKER => return Ok(Self::Open),
            CLOSE_MARKER => return Ok(Self::Close),
            _ => {}
        }

        let (quoted_key, value) = stripped
            .split_once(SEPARATOR)
            .ok_or(ParseFailure::MissingSeparator)?;
        if value.contains(SEPARATOR) {
            return Err(ParseFailure::ExtraSeparator);
        }

        let key = quoted_key
            .strip_prefix('"')
            .ok_or(ParseFailure::UnquotedKey)?;
        if key.is_empty() {
            return Err(ParseFailure::EmptyKey);
        }
        if value.is_empty() {
            return Err(ParseFailure::EmptyValue);
        }

        Ok(Self::Entry { key, value })
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Self::Open => out.push_str(OPEN_TOKEN),
            Self::Close => out.push_str(CLOSE_TOKEN),
            Self::Entry { key, value } => {
                out.push_str(&format!("    ({key}, GDValue::Int({value})),\n"))
            }
        }
    }
}

/// Strip surrounding whitespace, then any trailing commas
fn strip_line(line: &str) -> &str {
    line.trim().trim_end_matches(',')
}

/// Stateless converter from `json!` property blocks to `GDValue` vectors
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTransformer;

impl LineTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite every line of `input`. Input without any lines yields `""`.
    pub fn transform(&self, input: &str) -> TransformResult {
        let mut out = String::with_capacity(input.len() * 2);

        for (idx, raw) in split_lines(input).into_iter().enumerate() {
            let stripped = strip_line(raw);
            let line = Line::parse(stripped).map_err(|reason| TransformParseError {
                line_number: idx + 1,
                line: stripped.to_string(),
                reason,
                input: input.to_string(),
            })?;
            line.render_into(&mut out);
        }

        Ok(out)
    }
}

/// Characters that end a line: `\n`, `\r` (with `\r\n` as one break), the
/// vertical tab, form feed, file/group/record separators, NEL and the Unicode
/// line and paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every line break. A trailing break does not add an empty line.
fn split_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = input.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&input[start..idx]);
        start = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(_, '\n')) = chars.peek() {
                chars.next();
                start += 1;
            }
        }
    }

    if start < input.len() {
        lines.push(&input[start..]);
    }
    lines
}

/// Shorthand for `LineTransformer::new().transform(input)`
pub fn transform(input: &str) -> TransformResult {
    LineTransformer::new().transform(input)
}
