//! Bounded, append-only event log shown in the bottom panel.

use std::collections::VecDeque;

use serde::Serialize;

/// Maximum number of log entries kept on screen.
pub const MAX_LOG_ENTRIES: usize = 50;

/// Severity tag attached to every log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Short tag rendered in front of the message.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Success => " OK ",
            Severity::Error => "ERR ",
        }
    }
}

/// A single immutable log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Local wall-clock time of the append, formatted `HH:MM:SS`.
    pub timestamp: String,
    pub severity: Severity,
    pub message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current local time.
    pub fn now(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            severity,
            message: message.into(),
        }
    }
}

/// FIFO ring of log entries capped at [`MAX_LOG_ENTRIES`].
///
/// Entries are never modified once appended; the only removal is eviction
/// of the oldest entries from the front. The view follows the newest entry
/// unless the user has scrolled back, and any append snaps it back.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogSink {
    entries: VecDeque<LogEntry>,
    /// Lines scrolled back from the newest entry (0 = following).
    #[serde(skip)]
    scroll: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current local time.
    pub fn add_log(&mut self, severity: Severity, message: impl Into<String>) {
        self.push(LogEntry::now(severity, message));
    }

    /// Append a pre-built entry, evicting from the front past the cap.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.scroll = 0;
    }

    /// Empty the log and record that it was cleared.
    pub fn clear_logs(&mut self) {
        self.entries.clear();
        self.add_log(Severity::Info, "Logs cleared");
    }

    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently appended entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scroll back towards older entries.
    pub fn scroll_up(&mut self, n: usize) {
        let max = self.entries.len().saturating_sub(1);
        self.scroll = (self.scroll + n).min(max);
    }

    /// Scroll forward towards the newest entry.
    pub fn scroll_down(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_to_oldest(&mut self) {
        self.scroll = self.entries.len().saturating_sub(1);
    }

    /// Resume following the newest entry.
    pub fn follow(&mut self) {
        self.scroll = 0;
    }

    /// Entries visible in a window of `height` lines, oldest first.
    pub fn visible(&self, height: usize) -> impl Iterator<Item = &LogEntry> {
        let end = self.entries.len().saturating_sub(self.scroll);
        let start = end.saturating_sub(height);
        self.entries.range(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eviction_keeps_newest_fifty() {
        let mut logs = LogSink::new();
        for i in 1..=73 {
            logs.add_log(Severity::Info, format!("entry {}", i));
        }

        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        // Oldest survivor is append #(N - 49)
        assert_eq!(logs.entries().front().unwrap().message, "entry 24");
        assert_eq!(logs.latest().unwrap().message, "entry 73");
    }

    #[test]
    fn test_exactly_fifty_one_appends() {
        let mut logs = LogSink::new();
        for i in 1..=51 {
            logs.add_log(Severity::Success, format!("entry {}", i));
        }
        assert_eq!(logs.len(), 50);
        assert_eq!(logs.entries().front().unwrap().message, "entry 2");
    }

    #[test]
    fn test_under_cap_nothing_evicted() {
        let mut logs = LogSink::new();
        for i in 0..10 {
            logs.add_log(Severity::Info, format!("{}", i));
        }
        assert_eq!(logs.len(), 10);
        assert_eq!(logs.entries().front().unwrap().message, "0");
    }

    #[test]
    fn test_clear_leaves_single_entry() {
        let mut logs = LogSink::new();
        logs.add_log(Severity::Error, "boom");
        logs.add_log(Severity::Info, "hello");

        logs.clear_logs();

        assert_eq!(logs.len(), 1);
        let entry = logs.latest().unwrap();
        assert_eq!(entry.severity, Severity::Info);
        assert_eq!(entry.message, "Logs cleared");
    }

    #[test]
    fn test_timestamp_format() {
        let entry = LogEntry::now(Severity::Info, "x");
        let parts: Vec<&str> = entry.timestamp.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 2));
    }

    #[test]
    fn test_append_snaps_back_to_newest() {
        let mut logs = LogSink::new();
        for i in 0..20 {
            logs.add_log(Severity::Info, format!("{}", i));
        }
        logs.scroll_up(5);
        assert_eq!(logs.scroll(), 5);
        let last_visible = logs.visible(3).last().unwrap().message.clone();
        assert_eq!(last_visible, "14");

        logs.add_log(Severity::Info, "new");
        assert_eq!(logs.scroll(), 0);
        assert_eq!(logs.visible(3).last().unwrap().message, "new");
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut logs = LogSink::new();
        for i in 0..4 {
            logs.add_log(Severity::Info, format!("{}", i));
        }
        logs.scroll_up(100);
        assert_eq!(logs.scroll(), 3);
        assert_eq!(logs.visible(10).count(), 1);

        logs.scroll_down(100);
        assert_eq!(logs.scroll(), 0);
        assert_eq!(logs.visible(10).count(), 4);
    }
}
