//! Bounded list of advisory warnings shown to the user.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::config::WarningConfig;

/// Warning recorded when a payload fails the envelope contract.
pub const INVALID_DATA_WARNING: &str = "Invalid data received from host";

/// Warning recorded when processing fails after validation.
pub const PROCESSING_ERROR_WARNING: &str = "Error processing received data";

/// Warnings are never fatal; the oldest entry is evicted once the log is
/// full.
pub struct WarningLog {
    entries: Mutex<VecDeque<String>>,
    capacity: usize,
    visible: usize,
}

impl WarningLog {
    pub fn new(capacity: usize, visible: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            visible,
        }
    }

    pub fn from_config(config: &WarningConfig) -> Self {
        Self::new(config.capacity, config.visible)
    }

    pub fn push(&self, warning: impl Into<String>) {
        let mut entries = self.entries.lock().expect("warning log mutex poisoned");
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        if self.capacity > 0 {
            entries.push_back(warning.into());
        }
    }

    /// The most recent warnings meant for display, oldest first.
    pub fn recent(&self) -> Vec<String> {
        let entries = self.entries.lock().expect("warning log mutex poisoned");
        let skip = entries.len().saturating_sub(self.visible);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Every retained warning, oldest first.
    pub fn all(&self) -> Vec<String> {
        let entries = self.entries.lock().expect("warning log mutex poisoned");
        entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("warning log mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for WarningLog {
    fn default() -> Self {
        Self::from_config(&WarningConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_shows_last_visible() {
        let log = WarningLog::new(10, 3);
        for i in 0..5 {
            log.push(format!("w{}", i));
        }
        assert_eq!(log.recent(), vec!["w2", "w3", "w4"]);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let log = WarningLog::new(2, 2);
        log.push("a");
        log.push("b");
        log.push("c");
        assert_eq!(log.all(), vec!["b", "c"]);
    }

    #[test]
    fn test_empty() {
        let log = WarningLog::default();
        assert!(log.is_empty());
        assert!(log.recent().is_empty());
    }
}
