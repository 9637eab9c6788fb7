use log::info;
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 20;

/// Bounded history of user-visible activity, mirrored to the `log` facade.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    /// Oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_entry_when_full() {
        let mut log = ActivityLog::with_capacity(2);
        log.record("one");
        log.record("two");
        log.record("three");
        let entries: Vec<&str> = log.entries().collect();
        assert_eq!(entries, vec!["two", "three"]);
        assert_eq!(log.latest(), Some("three"));
    }
}
