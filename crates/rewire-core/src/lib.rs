//! # Rewire Core Library
//!
//! This library provides the streak engine behind the Rewire family of
//! habit trackers. One engine serves every branded variant; the variant is an
//! injected [`AppConfig`] and never a code path. The CLI binary is a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Streak**: the single [`StreakRecord`] with start/reset/freeze/cost
//!   operations. Day counts are recomputed from raw timestamps on every call
//! - **Milestones**: a pure evaluator over `(current_days, milestones, seen)`
//!   plus phase resolution and goal progress
//! - **Journal**: mood entries with identity-preserving undo via [`Trash`]
//! - **Storage**: a minimal [`KvStore`] seam with SQLite and in-memory
//!   backends, the namespaced aggregate slot, UI flags and TOML settings
//!
//! ## Key Components
//!
//! - [`Tracker`]: façade wiring config and persistence to the engine
//! - [`Summary`]: derived read model for display
//! - [`DisplayTimer`]: cancellable once-per-second live clock

pub mod clock;
pub mod config;
pub mod copy;
pub mod debounce;
pub mod error;
pub mod events;
pub mod freeze;
pub mod journal;
pub mod live;
pub mod milestone;
pub mod storage;
pub mod streak;
pub mod summary;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, Milestone, Phase, TimelineEntry};
pub use debounce::Debouncer;
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use freeze::RechargePolicy;
pub use journal::{Journal, JournalEntry, Trash};
pub use live::{DisplayTimer, LiveTime, TimerSlot};
pub use milestone::{MilestoneCrossed, MilestoneEvaluator, SeenPolicy};
pub use storage::{KvStore, MemoryStore, Persistence, Settings, Snapshot, SqliteStore, UiFlags};
pub use streak::{FreezeOutcome, ResetOutcome, StreakRecord};
pub use summary::Summary;
pub use tracker::Tracker;
