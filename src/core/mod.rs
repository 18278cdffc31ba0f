// src/core/mod.rs
//! Core building blocks: clipboard access, change watching, line rewriting
//! and the loop tying them together.

pub mod clipboard;
pub mod session;
pub mod transformer;
pub mod watcher;

pub use clipboard::{ClipboardProvider, MemoryClipboard, SystemClipboard};
pub use session::{CycleOutcome, LoopState, RefactorListener, RefactorSession, SkipPolicy};
pub use transformer::{transform, Line, LineTransformer, TransformResult};
pub use watcher::{ClipboardState, ClipboardWatcher, WatcherConfig};
