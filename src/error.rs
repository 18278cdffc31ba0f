// src/error.rs
//! Error types shared by the watcher, transformer and session

use thiserror::Error;

/// Why a single line could not be read as a `"<key>": <value>` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("missing `\": ` separator")]
    MissingSeparator,
    #[error("more than one `\": ` separator")]
    ExtraSeparator,
    #[error("key is not quoted")]
    UnquotedKey,
    #[error("empty key")]
    EmptyKey,
    #[error("empty value")]
    EmptyValue,
}

/// A transform that was rejected as a whole.
///
/// Keeps the untouched input so it can be echoed back in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number} ({line:?}): {reason}")]
pub struct TransformParseError {
    pub line_number: usize,
    pub line: String,
    pub reason: ParseFailure,
    pub input: String,
}

impl TransformParseError {
    /// The original clipboard text that failed to transform
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Failures of the underlying clipboard provider
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to open system clipboard: {0}")]
    Open(#[source] arboard::Error),

    #[error("failed to read clipboard text: {0}")]
    Read(#[source] arboard::Error),

    #[error("failed to write clipboard text: {0}")]
    Write(#[source] arboard::Error),
}
