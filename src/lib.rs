//! Clipboard Refactor Library
//!
//! Watches the clipboard for `json!({ "<key>": <value>, ... });` property
//! blocks and rewrites them into `vec![ (<key>, GDValue::Int(<value>)), ... ];`.

pub mod core;
pub mod error;

pub use error::{ClipboardError, ParseFailure, TransformParseError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::{
        transform, ClipboardProvider, ClipboardWatcher, CycleOutcome, LineTransformer, LoopState,
        MemoryClipboard, RefactorListener, RefactorSession, SkipPolicy, SystemClipboard,
        WatcherConfig,
    };
    pub use crate::error::*;
}
