//! In-memory rolling log for `tracing`.
//!
//! `RollingLayer` turns every event into a [`LogLine`], keeps the most recent
//! lines in a bounded [`LogBuffer`] and hands each line to a sink (the browser
//! console in the web app, stderr or nothing in tests).

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Shared ring of recent lines. Cloning shares the same ring.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    capacity: usize,
    lines: Arc<Mutex<VecDeque<LogLine>>>,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, line: LogLine) {
        // A poisoned lock only means a sink panicked mid-push; the ring is still usable.
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Newest first
    pub fn snapshot(&self) -> Vec<LogLine> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

pub type Sink = Box<dyn Fn(&LogLine) + Send + Sync>;

pub struct RollingLayer {
    buffer: LogBuffer,
    max_level: Level,
    sink: Sink,
}

impl RollingLayer {
    pub fn new(buffer: LogBuffer, max_level: Level, sink: Sink) -> Self {
        Self { buffer, max_level, sink }
    }

    pub fn buffer(&self) -> LogBuffer {
        self.buffer.clone()
    }
}

/// Collects the `message` field and appends the rest as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        // Level ordering: ERROR < WARN < INFO < DEBUG < TRACE
        if *metadata.level() > self.max_level {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let line = LogLine {
            timestamp: Utc::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: format!("{}{}", visitor.message, visitor.fields),
        };
        (self.sink)(&line);
        self.buffer.push(line);
    }
}

/// Parses `error|warn|info|debug|trace`, falling back to INFO
pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// Installs the layer as the global subscriber and returns the shared buffer.
pub fn init(capacity: usize, max_level: Level, sink: Sink) -> Result<LogBuffer, String> {
    let buffer = LogBuffer::new(capacity);
    tracing_subscriber::registry()
        .with(RollingLayer::new(buffer.clone(), max_level, sink))
        .try_init()
        .map_err(|e| format!("failed to install logger: {}", e))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::subscriber::with_default;

    fn line(message: &str) -> LogLine {
        LogLine {
            timestamp: Utc::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::new(2);
        buffer.push(line("a"));
        buffer.push(line("b"));
        buffer.push(line("c"));
        let messages: Vec<_> = buffer.snapshot().into_iter().map(|l| l.message).collect();
        assert_eq!(messages, vec!["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let buffer = LogBuffer::new(0);
        buffer.push(line("a"));
        buffer.push(line("b"));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_layer_records_message_and_fields() {
        let buffer = LogBuffer::new(10);
        let sunk = Arc::new(Mutex::new(Vec::new()));
        let sunk_clone = sunk.clone();
        let layer = RollingLayer::new(
            buffer.clone(),
            Level::INFO,
            Box::new(move |l: &LogLine| sunk_clone.lock().unwrap().push(l.message.clone())),
        );
        let subscriber = tracing_subscriber::registry().with(layer);

        with_default(subscriber, || {
            tracing::info!(total = 42, "poll tick");
            tracing::debug!("filtered out");
            tracing::warn!("slow response");
        });

        let lines = buffer.snapshot();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, Level::WARN);
        assert_eq!(lines[1].message, "poll tick total=42");
        assert_eq!(sunk.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("nonsense"), Level::INFO);
    }

    #[test]
    fn test_display() {
        let rendered = line("hello").to_string();
        assert!(rendered.ends_with(" INFO test: hello"));
    }
}
