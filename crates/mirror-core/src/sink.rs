//! Logging sink consumed by the synchronizer
//!
//! The engine only ever calls [`LogSink::accept`]. How messages are
//! formatted, where they are written and whether they are rotated is up to
//! the implementation handed to it at startup.

use std::sync::{Mutex, PoisonError};

/// Severity of a sink message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Append-only destination for leveled messages.
pub trait LogSink: Send + Sync {
    fn accept(&self, level: Level, message: &str);
}

/// Forwards messages to `tracing` under the `dirmirror` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn accept(&self, level: Level, message: &str) {
        match level {
            Level::Info => tracing::info!(target: "dirmirror", "{message}"),
            Level::Warn => tracing::warn!(target: "dirmirror", "{message}"),
            Level::Error => tracing::error!(target: "dirmirror", "{message}"),
        }
    }
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages received at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn accept(&self, level: Level, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order_and_levels() {
        let sink = RecordingSink::new();
        sink.accept(Level::Info, "first");
        sink.accept(Level::Error, "second");
        sink.accept(Level::Info, "third");

        assert_eq!(
            sink.records(),
            vec![
                (Level::Info, "first".to_string()),
                (Level::Error, "second".to_string()),
                (Level::Info, "third".to_string()),
            ]
        );
        assert_eq!(sink.messages_at(Level::Info), vec!["first", "third"]);
        assert!(sink.messages_at(Level::Warn).is_empty());
    }

    #[test]
    fn tracing_sink_accepts_every_level() {
        // No subscriber installed; events are dropped without panicking
        let sink = TracingSink;
        sink.accept(Level::Info, "info");
        sink.accept(Level::Warn, "warn");
        sink.accept(Level::Error, "error");
    }

    #[test]
    fn sinks_are_object_safe() {
        let sinks: Vec<Box<dyn LogSink>> = vec![Box::new(TracingSink), Box::new(RecordingSink::new())];
        for sink in &sinks {
            sink.accept(Level::Info, "shared");
        }
    }
}
