//! Append-only traffic log.
//!
//! Purely observational: the log records every frame the host controller
//! sends or receives plus every locally-recovered error, for display in
//! the embedding page. It has no correctness role in the protocol.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// What a log entry records.
#[derive(
    Serialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// A frame posted to the widget.
    Sent,
    /// A frame received from the widget.
    Received,
    /// A locally-recovered failure (parse error, token request failure).
    Error,
}

// ---------------------------------------------------------------------------
// LogEntry / TrafficLog
// ---------------------------------------------------------------------------

/// One observed frame or failure.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Monotonic id, unique within one [`TrafficLog`].
    pub id: u64,
    /// The logged text (usually the raw frame).
    pub text: String,
    /// What the entry records.
    pub direction: Direction,
    /// When the entry was recorded (UTC).
    pub timestamp: DateTime<Utc>,
}

/// Append-only log with a per-instance monotonic counter.
///
/// One log exists per controller instance; there is no process-wide
/// counter or singleton.
#[derive(Debug, Default)]
pub struct TrafficLog {
    next_id: u64,
    entries: Vec<LogEntry>,
}

impl TrafficLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a reference to it.
    pub fn record(&mut self, direction: Direction, text: impl Into<String>) -> &LogEntry {
        let entry = LogEntry {
            id: self.next_id,
            text: text.into(),
            direction,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.entries.push(entry);
        self.entries.last().expect("entry just pushed")
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries recorded with `direction`.
    pub fn count(&self, direction: Direction) -> usize {
        self.entries
            .iter()
            .filter(|e| e.direction == direction)
            .count()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut log = TrafficLog::new();
        log.record(Direction::Sent, "a");
        log.record(Direction::Received, "b");
        log.record(Direction::Error, "c");
        let ids: Vec<u64> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn entries_are_append_only() {
        let mut log = TrafficLog::new();
        log.record(Direction::Sent, "first");
        log.record(Direction::Sent, "second");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].text, "first");
        assert_eq!(log.entries()[1].text, "second");
    }

    #[test]
    fn count_filters_by_direction() {
        let mut log = TrafficLog::new();
        log.record(Direction::Sent, "a");
        log.record(Direction::Error, "b");
        log.record(Direction::Error, "c");
        assert_eq!(log.count(Direction::Sent), 1);
        assert_eq!(log.count(Direction::Error), 2);
        assert_eq!(log.count(Direction::Received), 0);
    }

    #[test]
    fn separate_logs_have_independent_counters() {
        let mut a = TrafficLog::new();
        let mut b = TrafficLog::new();
        a.record(Direction::Sent, "x");
        assert_eq!(b.record(Direction::Sent, "y").id, 0);
        assert_eq!(a.record(Direction::Sent, "z").id, 1);
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Sent.to_string(), "sent");
        assert_eq!(Direction::Received.to_string(), "received");
        assert_eq!(Direction::Error.to_string(), "error");
    }
}
