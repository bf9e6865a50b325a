use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::JournalEntry;

pub const DEFAULT_CAPACITY: usize = 5;
pub const DEFAULT_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Trashed {
    deleted_at: DateTime<Utc>,
    entry: JournalEntry,
}

/// Recently deleted journal entries, kept for undo.
///
/// Owned by the caller, not by [`super::Journal`]. Bounded in size; entries
/// older than the TTL can no longer be restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trash {
    capacity: usize,
    ttl_secs: i64,
    items: VecDeque<Trashed>,
}

impl Default for Trash {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl Trash {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl_secs: ttl.num_seconds().max(0),
            items: VecDeque::new(),
        }
    }

    /// Replace the restore window, keeping what is already trashed.
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl_secs = i64::try_from(secs).unwrap_or(i64::MAX);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, entry: JournalEntry, now: DateTime<Utc>) {
        self.items.push_back(Trashed {
            deleted_at: now,
            entry,
        });
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    /// Take the most recently deleted entry if it is still restorable.
    pub fn take_latest(&mut self, now: DateTime<Utc>) -> Option<JournalEntry> {
        self.purge_expired(now);
        self.items.pop_back().map(|t| t.entry)
    }

    /// Take a specific entry by its original id.
    pub fn take(&mut self, id: &str, now: DateTime<Utc>) -> Option<JournalEntry> {
        self.purge_expired(now);
        let index = self.items.iter().position(|t| t.entry.id == id)?;
        self.items.remove(index).map(|t| t.entry)
    }

    pub fn purge_expired(&mut self, now: DateTime<Utc>) {
        let ttl_ms = self.ttl_secs.saturating_mul(1000);
        self.items
            .retain(|t| (now - t.deleted_at).num_milliseconds() <= ttl_ms);
    }
}
