// src/main.rs
//! Clipboard refactor tool
//!
//! Watches the clipboard, rewrites `json!({ "<key>": <value>, ... });` blocks
//! into `vec![ (<key>, GDValue::Int(<value>)), ... ];` and pastes the result
//! back. Runs until the process is killed.

use std::io::Read;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use clip_refactor::core::{
    ClipboardWatcher, LineTransformer, RefactorListener, RefactorSession, SystemClipboard,
    WatcherConfig,
};
use clip_refactor::error::TransformParseError;

/// Command line interface for the clipboard refactor tool
#[derive(Debug, Parser)]
#[command(
    name = "clip-refactor",
    about = "Rewrites json!() property blocks on the clipboard into GDValue vec![] literals",
    long_about = "Polls the system clipboard. Whenever new text of the form json!({ \"<key>\": <value>, ... }); is copied, it is replaced on the clipboard by vec![ (<key>, GDValue::Int(<value>)), ... ];. Anything else is reported and left untouched."
)]
struct Args {
    /// Clipboard poll period in milliseconds
    #[arg(long, default_value_t = 20)]
    interval_ms: u64,

    /// Output format for diagnostic events
    #[arg(long, default_value = "human", value_enum)]
    format: OutputFormat,

    /// Verbosity level for logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Transform standard input once, print the result and exit
    #[arg(long, help = "Read a block from stdin instead of watching the clipboard")]
    stdin: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// The plain status lines: detected / pasting / failed
    Human,
    /// One JSON object per event
    Json,
}

struct RefactorApp {
    config: Args,
    start_time: Instant,
}

impl RefactorApp {
    fn new(config: Args) -> Result<Self> {
        Self::setup_logging(&config)?;

        info!("🚀 Starting clip-refactor v{}", env!("CARGO_PKG_VERSION"));
        info!("Configuration: {:?}", config);

        Ok(Self {
            config,
            start_time: Instant::now(),
        })
    }

    fn run(self) -> Result<()> {
        if self.config.stdin {
            return Self::transform_stdin();
        }

        let clipboard = SystemClipboard::new().context("Failed to access system clipboard")?;
        let watcher_config = WatcherConfig {
            poll_interval: Duration::from_millis(self.config.interval_ms),
        };
        let watcher = ClipboardWatcher::new(clipboard, watcher_config)
            .context("Failed to read initial clipboard content")?;

        let mut session = RefactorSession::new(watcher, LineTransformer::new());
        session.add_listener(EventPrinter::new(self.config.format));

        info!("👀 Watching clipboard every {}ms. Press Ctrl+C to stop.", self.config.interval_ms);

        let result = session.run().context("Clipboard access failed");

        info!(
            "📊 Stopped after {} pastes. Runtime: {:.2}s",
            session.cycles(),
            self.start_time.elapsed().as_secs_f64()
        );
        result
    }

    fn transform_stdin() -> Result<()> {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read standard input")?;

        let output = LineTransformer::new()
            .transform(&input)
            .context("Failed to refactor standard input")?;
        println!("{output}");
        Ok(())
    }

    /// Set up logging based on verbosity level
    fn setup_logging(config: &Args) -> Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let level = match config.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(config.verbose > 1)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        Ok(())
    }
}

/// Structured form of a diagnostic event
#[derive(Debug, Serialize)]
struct DiagnosticEvent<'a> {
    event: &'a str,
    event_number: usize,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// A session event as seen by the printer
#[derive(Debug, Clone, Copy)]
enum SessionEvent<'a> {
    Started,
    PasteDetected(&'a str),
    Published(&'a str),
    Failed(&'a TransformParseError),
}

impl SessionEvent<'_> {
    fn name(&self) -> &'static str {
        match self {
            Self::Started => "session_started",
            Self::PasteDetected(_) => "paste_detected",
            Self::Published(_) => "published",
            Self::Failed(_) => "failed",
        }
    }
}

/// Prints one line per session event to stdout
struct EventPrinter {
    format: OutputFormat,
    event_count: usize,
}

impl EventPrinter {
    fn new(format: OutputFormat) -> Self {
        Self {
            format,
            event_count: 0,
        }
    }

    /// The line printed for `event`, if this format prints one
    fn render(
        &self,
        event: SessionEvent<'_>,
        event_number: usize,
        timestamp: &str,
    ) -> serde_json::Result<Option<String>> {
        match self.format {
            OutputFormat::Human => Ok(match event {
                SessionEvent::Started => None,
                SessionEvent::PasteDetected(input) => Some(format!("detected new paste: {input}")),
                SessionEvent::Published(output) => Some(format!("pasting string: {output}")),
                SessionEvent::Failed(error) => {
                    Some(format!("failed to refactor: {}", error.input()))
                }
            }),
            OutputFormat::Json => {
                let (text, error) = match event {
                    SessionEvent::Started => (None, None),
                    SessionEvent::PasteDetected(text) | SessionEvent::Published(text) => {
                        (Some(text), None)
                    }
                    SessionEvent::Failed(error) => (Some(error.input()), Some(error.to_string())),
                };
                let record = DiagnosticEvent {
                    event: event.name(),
                    event_number,
                    timestamp: timestamp.to_string(),
                    text,
                    error,
                };
                serde_json::to_string(&record).map(Some)
            }
        }
    }

    fn emit(&mut self, event: SessionEvent<'_>) {
        self.event_count += 1;
        let timestamp = chrono::Utc::now().to_rfc3339();
        match self.render(event, self.event_count, &timestamp) {
            Ok(Some(line)) => println!("{line}"),
            Ok(None) => {}
            Err(e) => error!("Failed to serialize {} event: {}", event.name(), e),
        }
    }
}

impl RefactorListener for EventPrinter {
    fn on_paste_detected(&mut self, input: &str) {
        self.emit(SessionEvent::PasteDetected(input));
    }

    fn on_published(&mut self, output: &str) {
        self.emit(SessionEvent::Published(output));
    }

    fn on_failed(&mut self, error: &TransformParseError) {
        self.emit(SessionEvent::Failed(error));
    }

    fn on_session_started(&mut self) {
        self.emit(SessionEvent::Started);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let app = RefactorApp::new(args).context("Failed to initialize clip-refactor")?;
    app.run()
}
