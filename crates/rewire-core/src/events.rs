use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the tracker produces an Event.
/// The CLI prints them; a GUI would poll or subscribe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StreakStarted {
        at: DateTime<Utc>,
    },
    StreakReset {
        finished_days: u32,
        new_longest: bool,
        total_resets: u32,
        at: DateTime<Utc>,
    },
    FreezeUsed {
        remaining: u32,
        at: DateTime<Utc>,
    },
    /// No token was available; nothing changed.
    FreezeExhausted {
        at: DateTime<Utc>,
    },
    FreezesGranted {
        granted: u32,
        available: u32,
        at: DateTime<Utc>,
    },
    DailyCostSet {
        amount: f64,
        at: DateTime<Utc>,
    },
    /// Fired once for the highest newly-crossed threshold.
    MilestoneCrossed {
        day: u32,
        label: String,
        icon: String,
        message: String,
        also_marked: Vec<u32>,
        at: DateTime<Utc>,
    },
    JournalEntryAdded {
        id: String,
        mood: u8,
        at: DateTime<Utc>,
    },
    JournalEntryDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    JournalEntryRestored {
        id: String,
        at: DateTime<Utc>,
    },
    DataCleared {
        at: DateTime<Utc>,
    },
}
