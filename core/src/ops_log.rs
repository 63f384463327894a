//! The operations log feed.
//!
//! A bounded, newest-first list of timestamped status messages. Insertion
//! prepends; once the feed holds `capacity` entries, each new entry evicts
//! the oldest one from the tail.

use crate::{
    config::InputPolicy,
    error::{MissionError, MissionResult},
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

pub const DEFAULT_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal   => "normal",
            Self::Warning  => "warning",
            Self::Critical => "critical",
        }
    }

    /// Parse a caller-supplied severity under the given policy.
    /// Permissive input falls back to `Normal`.
    pub fn parse_with(value: &str, policy: InputPolicy) -> MissionResult<Self> {
        match (value.parse::<Self>(), policy) {
            (Ok(severity), _) => Ok(severity),
            (Err(_), InputPolicy::Permissive) => {
                log::warn!("unknown severity '{value}', recording as normal");
                Ok(Self::Normal)
            }
            (Err(e), InputPolicy::Strict) => Err(e),
        }
    }
}

impl FromStr for Severity {
    type Err = MissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal"   => Ok(Self::Normal),
            "warning"  => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(MissionError::InvalidSeverity { value: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationLogEntry {
    /// Wall-clock time of day, `HH:MM:SS`.
    pub time:     String,
    pub message:  String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationLog {
    entries:  VecDeque<OperationLogEntry>,
    capacity: usize,
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl OperationLog {
    /// A zero capacity is bumped to 1 so the newest entry is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Prepend `entry`, evicting from the tail past capacity.
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, entry: OperationLogEntry) -> Option<OperationLogEntry> {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&OperationLogEntry> {
        self.entries.front()
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &OperationLogEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<OperationLogEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> OperationLogEntry {
        OperationLogEntry {
            time:     "00:00:00".into(),
            message:  format!("msg-{n}"),
            severity: Severity::Normal,
        }
    }

    #[test]
    fn newest_first() {
        let mut log = OperationLog::default();
        log.push(entry(1));
        log.push(entry(2));
        assert_eq!(log.latest().unwrap().message, "msg-2");
        let messages: Vec<_> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["msg-2", "msg-1"]);
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut log = OperationLog::with_capacity(3);
        for n in 1..=3 {
            assert!(log.push(entry(n)).is_none());
        }
        let evicted = log.push(entry(4)).expect("eviction");
        assert_eq!(evicted.message, "msg-1");
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn zero_capacity_keeps_newest() {
        let mut log = OperationLog::with_capacity(0);
        log.push(entry(1));
        log.push(entry(2));
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().message, "msg-2");
    }

    #[test]
    fn severity_parsing() {
        assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!(" critical ".parse::<Severity>().unwrap(), Severity::Critical);
        assert!("fatal".parse::<Severity>().is_err());
        assert_eq!(
            Severity::parse_with("fatal", InputPolicy::Permissive).unwrap(),
            Severity::Normal
        );
        assert!(matches!(
            Severity::parse_with("fatal", InputPolicy::Strict),
            Err(MissionError::InvalidSeverity { .. })
        ));
    }
}
