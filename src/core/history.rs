//! Dispatch history tracking.
//!
//! Every transition a machine takes is recorded as a timestamped
//! [`DispatchRecord`]. Histories may be bounded, in which case the oldest
//! records are evicted first.

use super::identifier::Identifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single transition taken by a machine.
///
/// # Example
///
/// ```rust
/// use mosaic::core::DispatchRecord;
/// use chrono::Utc;
///
/// let record = DispatchRecord {
///     from: "idle".into(),
///     event: "go".into(),
///     to: "busy".into(),
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_self_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// State left
    pub from: Identifier,
    /// Event that caused the move
    pub event: Identifier,
    /// State entered
    pub to: Identifier,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl DispatchRecord {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of transitions, oldest first.
///
/// # Example
///
/// ```rust
/// use mosaic::core::{DispatchHistory, DispatchRecord};
/// use chrono::Utc;
///
/// let mut history = DispatchHistory::unbounded();
/// history.push(DispatchRecord {
///     from: "red".into(),
///     event: "next".into(),
///     to: "green".into(),
///     timestamp: Utc::now(),
/// });
/// history.push(DispatchRecord {
///     from: "green".into(),
///     event: "next".into(),
///     to: "yellow".into(),
///     timestamp: Utc::now(),
/// });
///
/// let path: Vec<&str> = history.path().into_iter().map(|s| s.as_str()).collect();
/// assert_eq!(path, vec!["red", "green", "yellow"]);
/// ```
///
/// Deserializing keeps only the newest `limit` records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct DispatchHistory {
    records: VecDeque<DispatchRecord>,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct StoredHistory {
    records: VecDeque<DispatchRecord>,
    limit: Option<usize>,
}

impl From<StoredHistory> for DispatchHistory {
    fn from(stored: StoredHistory) -> Self {
        let mut history = Self::with_limit(stored.limit);
        for record in stored.records {
            history.push(record);
        }
        history
    }
}

impl DispatchHistory {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(limit) => Self::bounded(limit),
            None => Self::unbounded(),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a record, evicting the oldest ones beyond the limit.
    pub fn push(&mut self, record: DispatchRecord) {
        if self.limit == Some(0) {
            return;
        }
        self.records.push_back(record);
        if let Some(limit) = self.limit {
            while self.records.len() > limit {
                self.records.pop_front();
            }
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &DispatchRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&DispatchRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// States traversed: the first recorded source, then every target.
    pub fn path(&self) -> Vec<&Identifier> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|r| &r.to));
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
