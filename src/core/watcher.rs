// src/core/watcher.rs
//! Polling clipboard watcher with echo skipping

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::core::clipboard::ClipboardProvider;
use crate::error::ClipboardError;

/// Watcher configuration
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(20),
        }
    }
}

/// What the watcher remembers between polls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardState {
    /// Last observed clipboard text
    pub previous: String,
    /// Changes observed since the last accepted one
    pub skip_counter: u32,
}

/// Blocks until the clipboard changes enough times to count as new input.
///
/// `required_skips` is the number of changes to let pass before one is
/// accepted; after writing to the clipboard ourselves a value of 1 swallows
/// the echo of that write.
pub struct ClipboardWatcher<P> {
    clipboard: P,
    config: WatcherConfig,
    state: ClipboardState,
}

/// Outcome of a single clipboard read
#[derive(Debug, Clone, PartialEq, Eq)]
enum Tick {
    Unchanged,
    Skipped,
    Accepted(String),
}

impl<P: ClipboardProvider> ClipboardWatcher<P> {
    /// Create a watcher, treating whatever is on the clipboard right now as
    /// already seen.
    pub fn new(mut clipboard: P, config: WatcherConfig) -> Result<Self, ClipboardError> {
        let previous = clipboard.read()?.unwrap_or_default();
        Ok(Self {
            clipboard,
            config,
            state: ClipboardState {
                previous,
                skip_counter: 0,
            },
        })
    }

    /// Poll until a change survives the skip policy and return it.
    ///
    /// Sleeps only while the clipboard is unchanged. There is no timeout: this
    /// returns only on an accepted change or on a clipboard error.
    pub fn wait_for_change(&mut self, required_skips: u32) -> Result<String, ClipboardError> {
        loop {
            match self.tick(required_skips)? {
                Tick::Accepted(text) => return Ok(text),
                Tick::Skipped => continue,
                Tick::Unchanged => thread::sleep(self.config.poll_interval),
            }
        }
    }

    /// One read of the clipboard, without sleeping.
    ///
    /// Returns `Some` only when the read value is new and the number of
    /// changes seen so far exceeds `required_skips`.
    pub fn poll(&mut self, required_skips: u32) -> Result<Option<String>, ClipboardError> {
        Ok(match self.tick(required_skips)? {
            Tick::Accepted(text) => Some(text),
            Tick::Skipped | Tick::Unchanged => None,
        })
    }

    fn tick(&mut self, required_skips: u32) -> Result<Tick, ClipboardError> {
        // a clipboard without text is never a new paste
        let current = match self.clipboard.read()? {
            Some(text) if text != self.state.previous => text,
            _ => return Ok(Tick::Unchanged),
        };

        self.state.previous = current;
        self.state.skip_counter += 1;

        if self.state.skip_counter > required_skips {
            self.state.skip_counter = 0;
            return Ok(Tick::Accepted(self.state.previous.clone()));
        }

        debug!(
            skip_counter = self.state.skip_counter,
            required_skips, "skipping clipboard change"
        );
        Ok(Tick::Skipped)
    }

    pub fn state(&self) -> &ClipboardState {
        &self.state
    }

    pub fn clipboard(&self) -> &P {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut P {
        &mut self.clipboard
    }
}
