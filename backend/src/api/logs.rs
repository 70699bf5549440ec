//! Real-time log streaming via Server-Sent Events (SSE).
//!
//! [`BroadcastLogger`] is the process-wide `log` backend: every record is
//! printed to stdout and broadcast to the SSE clients of `/api/logs`.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Log level for frontend display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => LogLevel::Error,
            Level::Warn => LogLevel::Warning,
            Level::Info => LogLevel::Info,
            Level::Debug | Level::Trace => LogLevel::Debug,
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Module that emitted the record
    pub target: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            target: target.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<BroadcastLogger> = Lazy::new(BroadcastLogger::new);

/// Broadcasts log entries to all connected SSE clients
pub struct BroadcastLogger {
    sender: broadcast::Sender<LogEntry>,
}

impl BroadcastLogger {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Print an entry and send it to all subscribers
    pub fn publish(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Debug => "   ·",
            LogLevel::Info => "   ",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        println!("{} {}", prefix, entry.message);

        // No receivers is fine
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for SSE streaming
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for BroadcastLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.publish(LogEntry::new(
            record.level().into(),
            record.target(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

/// Install [`LOG_BROADCASTER`] as the `log` backend.
///
/// The level comes from `RUST_LOG` (`error` … `trace`), `info` otherwise.
pub fn init() -> Result<(), SetLoggerError> {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    log::set_logger(&*LOG_BROADCASTER)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = LogEntry::new(LogLevel::Warning, "candy_mint::rpc", "Node is behind");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["level"], "warning");
        assert_eq!(value["target"], "candy_mint::rpc");
        assert_eq!(value["message"], "Node is behind");
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::from(Level::Warn), LogLevel::Warning);
        assert_eq!(LogLevel::from(Level::Trace), LogLevel::Debug);
    }

    #[test]
    fn test_subscribers_receive_entries() {
        let logger = BroadcastLogger::new();
        let mut rx = logger.subscribe();

        logger.publish(LogEntry::new(LogLevel::Info, "test", "🍬 sale state refreshed"));

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.message, "🍬 sale state refreshed");
        assert_eq!(entry.level, LogLevel::Info);
    }
}
