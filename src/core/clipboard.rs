// src/core/clipboard.rs
//! Clipboard providers: the only I/O boundary of the refactor loop

use std::collections::VecDeque;

use tracing::trace;

use crate::error::ClipboardError;

/// Plain-text clipboard access
pub trait ClipboardProvider {
    /// Current clipboard text, or `None` when the clipboard holds no text
    /// (an image, files, or nothing at all).
    fn read(&mut self) -> Result<Option<String>, ClipboardError>;

    /// Replace the clipboard content
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard, through arboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(ClipboardError::Open)?;
        Ok(Self { inner })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read(&mut self) -> Result<Option<String>, ClipboardError> {
        match self.inner.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipboardError::Read(e)),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text).map_err(ClipboardError::Write)
    }
}

/// In-process clipboard for headless runs and tests.
///
/// `current` is what a read returns. Queued copies model changes made by
/// someone else: each read returns the current value first and then applies
/// the next queued copy, so a value written by us is always seen by the
/// following read before any later external copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    current: Option<String>,
    pending: VecDeque<Option<String>>,
    writes: Vec<String>,
}

impl MemoryClipboard {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: Some(initial.into()),
            ..Self::default()
        }
    }

    /// Queue an external text copy, applied after the next read
    pub fn copy_external(&mut self, text: impl Into<String>) {
        self.pending.push_back(Some(text.into()));
    }

    /// Queue an external copy of something that is not text
    pub fn copy_non_text(&mut self) {
        self.pending.push_back(None);
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Everything written through `ClipboardProvider::write`, oldest first
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn read(&mut self) -> Result<Option<String>, ClipboardError> {
        let seen = self.current.clone();
        if let Some(next) = self.pending.pop_front() {
            trace!(text = next.is_some(), "applying queued external copy");
            self.current = next;
        }
        Ok(seen)
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.current = Some(text.to_string());
        self.writes.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_applies_copies_after_read() {
        let mut cb = MemoryClipboard::new("a");
        cb.copy_external("b");
        cb.copy_non_text();
        cb.copy_external("c");

        assert_eq!(cb.read().unwrap().as_deref(), Some("a"));
        assert_eq!(cb.read().unwrap().as_deref(), Some("b"));
        assert_eq!(cb.read().unwrap(), None);
        assert_eq!(cb.read().unwrap().as_deref(), Some("c"));
        assert_eq!(cb.read().unwrap().as_deref(), Some("c"));
    }

    #[test]
    fn test_memory_clipboard_write_seen_before_queued_copy() {
        let mut cb = MemoryClipboard::new("a");
        cb.write("ours").unwrap();
        cb.copy_external("theirs");

        assert_eq!(cb.read().unwrap().as_deref(), Some("ours"));
        assert_eq!(cb.read().unwrap().as_deref(), Some("theirs"));
        assert_eq!(cb.writes(), ["ours".to_string()]);
    }
}
