//! Structured combat log.

use std::collections::VecDeque;

use crate::config::GameConfig;

use super::Side;

/// Log entry category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LogCategory {
    Damage,
    Heal,
    Death,
    Skill,
    System,
}

/// A log line produced during a tick, before it is stamped and sequenced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub category: LogCategory,
    pub side: Side,
    pub message: String,
}

impl LogRecord {
    pub fn new(category: LogCategory, side: Side, message: impl Into<String>) -> Self {
        Self {
            category,
            side,
            message: message.into(),
        }
    }
}

/// A published combat log line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Monotonically increasing across the match, survives truncation.
    pub seq: u64,
    /// Remaining match time when the entry was written, as `m:ss`.
    pub time: String,
    pub category: LogCategory,
    pub side: Side,
    pub message: String,
}

/// Append-only log capped at [`GameConfig::LOG_CAPACITY`] most-recent entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    next_seq: u64,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps and appends records, evicting the oldest entries past capacity.
    pub fn append(&mut self, time: &str, records: impl IntoIterator<Item = LogRecord>) {
        for record in records {
            self.entries.push_back(LogEntry {
                seq: self.next_seq,
                time: time.to_owned(),
                category: record.category,
                side: record.side,
                message: record.message,
            });
            self.next_seq += 1;
        }
        while self.entries.len() > GameConfig::LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn push(&mut self, time: &str, record: LogRecord) {
        self.append(time, std::iter::once(record));
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Entries with a sequence number at or after `seq`.
    pub fn since(&self, seq: u64) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |entry| entry.seq >= seq)
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sequence number the next appended entry will receive.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }
}

/// Formats remaining match seconds as `m:ss`.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
