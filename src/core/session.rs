// src/core/session.rs
//! The wait -> transform -> publish loop

use tracing::{debug, info, warn};

use crate::core::clipboard::ClipboardProvider;
use crate::core::transformer::LineTransformer;
use crate::core::watcher::ClipboardWatcher;
use crate::error::{ClipboardError, TransformParseError};

/// Where the loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Waiting,
    Transforming,
    Published,
    Failed,
}

/// How many clipboard changes the next wait lets pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipPolicy {
    pub required_skips: u32,
}

impl SkipPolicy {
    /// After a write the first change is our own echo
    pub const AFTER_PUBLISH: Self = Self { required_skips: 1 };
    /// Nothing was written, accept the very next change
    pub const AFTER_FAILURE: Self = Self { required_skips: 0 };
}

/// Result of one full cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Published { input: String, output: String },
    Failed { error: TransformParseError },
}

/// Receives diagnostic events from a running session
pub trait RefactorListener {
    /// A change survived the skip policy
    fn on_paste_detected(&mut self, input: &str);

    /// The transformed text was written back
    fn on_published(&mut self, output: &str);

    /// The input was rejected and the clipboard left alone
    fn on_failed(&mut self, error: &TransformParseError);

    /// Called once before the first wait
    fn on_session_started(&mut self) {}
}

/// Drives the watcher and transformer against one clipboard
pub struct RefactorSession<P> {
    watcher: ClipboardWatcher<P>,
    transformer: LineTransformer,
    policy: SkipPolicy,
    state: LoopState,
    cycles: u64,
    started: bool,
    listeners: Vec<Box<dyn RefactorListener>>,
}

impl<P: ClipboardProvider> RefactorSession<P> {
    pub fn new(watcher: ClipboardWatcher<P>, transformer: LineTransformer) -> Self {
        Self {
            watcher,
            transformer,
            policy: SkipPolicy::default(),
            state: LoopState::Waiting,
            cycles: 0,
            started: false,
            listeners: Vec::new(),
        }
    }

    pub fn add_listener<T: RefactorListener + 'static>(&mut self, listener: T) {
        self.listeners.push(Box::new(listener));
    }

    /// Loop forever; only a clipboard error ends it
    pub fn run(&mut self) -> Result<(), ClipboardError> {
        loop {
            self.step()?;
        }
    }

    /// Wait for one accepted change, transform it and publish or report it
    pub fn step(&mut self) -> Result<CycleOutcome, ClipboardError> {
        if !self.started {
            self.started = true;
            for listener in &mut self.listeners {
                listener.on_session_started();
            }
        }

        self.state = LoopState::Waiting;
        debug!(required_skips = self.policy.required_skips, "waiting for clipboard change");
        let input = self.watcher.wait_for_change(self.policy.required_skips)?;
        self.cycles += 1;
        for listener in &mut self.listeners {
            listener.on_paste_detected(&input);
        }

        self.state = LoopState::Transforming;
        match self.transformer.transform(&input) {
            Ok(output) => {
                self.watcher.clipboard_mut().write(&output)?;
                self.state = LoopState::Published;
                self.policy = SkipPolicy::AFTER_PUBLISH;
                info!(cycle = self.cycles, bytes = output.len(), "published refactored text");
                for listener in &mut self.listeners {
                    listener.on_published(&output);
                }
                Ok(CycleOutcome::Published { input, output })
            }
            Err(error) => {
                self.state = LoopState::Failed;
                self.policy = SkipPolicy::AFTER_FAILURE;
                warn!(cycle = self.cycles, %error, "clipboard text not refactored");
                for listener in &mut self.listeners {
                    listener.on_failed(&error);
                }
                Ok(CycleOutcome::Failed { error })
            }
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn policy(&self) -> SkipPolicy {
        self.policy
    }

    /// Number of accepted clipboard changes so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn watcher(&self) -> &ClipboardWatcher<P> {
        &self.watcher
    }

    pub fn watcher_mut(&mut self) -> &mut ClipboardWatcher<P> {
        &mut self.watcher
    }
}
