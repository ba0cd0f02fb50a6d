//! Match event log
//!
//! Append-only, newest first, capped at [`MAX_LOG_ENTRIES`]. Entries past the
//! cap are dropped silently. No deduplication.

use std::collections::VecDeque;

use matchtimer_types::LogEntry;

/// Number of entries retained
pub const MAX_LOG_ENTRIES: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an entry, evicting the oldest past the cap
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(MAX_LOG_ENTRIES);
    }

    pub fn record(&mut self, time: f64, message: impl Into<String>, icon: impl Into<String>) {
        self.push(LogEntry::new(time, message, icon));
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_comes_first() {
        let mut log = EventLog::new();
        log.record(1.0, "first", "a");
        log.record(2.0, "second", "b");

        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["second", "first"]);
        assert_eq!(log.latest().unwrap().icon, "b");
    }

    #[test]
    fn keeps_only_the_most_recent_fifty() {
        let mut log = EventLog::new();
        for i in 0..60 {
            log.record(i as f64, format!("entry {i}"), "");
        }

        assert_eq!(log.len(), MAX_LOG_ENTRIES);
        let entries: Vec<_> = log.entries().collect();
        assert_eq!(entries.first().unwrap().message, "entry 59");
        assert_eq!(entries.last().unwrap().message, "entry 10");
    }

    #[test]
    fn duplicates_are_kept() {
        let mut log = EventLog::new();
        log.record(5.0, "same", "");
        log.record(5.0, "same", "");
        assert_eq!(log.len(), 2);
    }
}
