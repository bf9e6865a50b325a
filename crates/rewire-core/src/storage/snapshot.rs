//! The persisted aggregate.
//!
//! Field names follow the on-device JSON format:
//!
//! ```text
//! { startDate, isActive, freezesAvailable, longestStreak, totalResets,
//!   totalCleanDays, pastStreaks, dailyCost, journal, seenMilestones,
//!   freezesUsed, lastFreezeRecharge }
//! ```
//!
//! Every field is optional on read. Older snapshots that stored the history
//! as `streaks` and derived the counters from it are migrated on load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::journal::{Journal, JournalEntry};
use crate::streak::{is_valid_daily_cost, StreakRecord, INITIAL_FREEZES};

/// Seen thresholds beyond a century are treated as garbage.
pub const MAX_SEEN_DAY: u32 = 36_500;

fn default_freezes() -> u32 {
    INITIAL_FREEZES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default = "default_freezes")]
    pub freezes_available: u32,
    #[serde(default)]
    pub longest_streak: Option<u32>,
    #[serde(default)]
    pub total_resets: Option<u32>,
    #[serde(default)]
    pub total_clean_days: u64,
    #[serde(default, alias = "streaks")]
    pub past_streaks: Vec<u32>,
    #[serde(default)]
    pub daily_cost: Option<f64>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    /// `None` when the snapshot predates the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seen_milestones: Option<Vec<u32>>,
    #[serde(default)]
    pub freezes_used: u32,
    #[serde(default)]
    pub last_freeze_recharge: Option<DateTime<Utc>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::capture(&StreakRecord::default(), &Journal::default(), &BTreeSet::new())
    }
}

/// Domain state rebuilt from a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub record: StreakRecord,
    pub journal: Journal,
    /// `None` when the snapshot carried no seen set.
    pub seen: Option<BTreeSet<u32>>,
}

/// Drop out-of-range thresholds.
pub fn sanitize_seen(days: impl IntoIterator<Item = u32>) -> BTreeSet<u32> {
    days.into_iter().filter(|d| *d <= MAX_SEEN_DAY).collect()
}

impl Snapshot {
    pub fn capture(record: &StreakRecord, journal: &Journal, seen: &BTreeSet<u32>) -> Self {
        Self {
            start_date: record.start,
            is_active: Some(record.active),
            freezes_available: record.freezes_available,
            longest_streak: Some(record.longest_streak),
            total_resets: Some(record.total_resets),
            total_clean_days: record.total_clean_days,
            past_streaks: record.past_streaks.clone(),
            daily_cost: record.daily_cost,
            journal: journal.entries().to_vec(),
            seen_milestones: Some(seen.iter().copied().collect()),
            freezes_used: record.freezes_used,
            last_freeze_recharge: record.last_freeze_recharge,
        }
    }

    pub fn restore(self) -> Restored {
        let history_max = self.past_streaks.iter().copied().max().unwrap_or(0);
        let daily_cost = self.daily_cost.filter(|c| is_valid_daily_cost(*c));
        if self.daily_cost.is_some() && daily_cost.is_none() {
            tracing::warn!("discarding invalid daily cost from snapshot");
        }

        let record = StreakRecord {
            start: self.start_date,
            active: self.is_active.unwrap_or(true) && self.start_date.is_some(),
            freezes_available: self.freezes_available,
            freezes_used: self.freezes_used,
            last_freeze_recharge: self.last_freeze_recharge,
            longest_streak: self.longest_streak.unwrap_or(0).max(history_max),
            total_resets: self
                .total_resets
                .unwrap_or(u32::try_from(self.past_streaks.len()).unwrap_or(u32::MAX)),
            total_clean_days: self.total_clean_days,
            past_streaks: self.past_streaks,
            daily_cost,
        };

        Restored {
            record,
            journal: Journal::from_entries(self.journal),
            seen: self.seen_milestones.map(sanitize_seen),
        }
    }
}
