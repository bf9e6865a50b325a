//! Device-local persistence.
//!
//! - [`KvStore`]: minimal get/set/remove seam, with [`MemoryStore`] for
//!   tests and [`SqliteStore`] for the device
//! - [`Persistence`]: the namespaced `{appId}-streak-data` aggregate slot
//! - [`UiFlags`]: single-value keys owned by the caller, never written by
//!   the engine
//! - [`Settings`]: user preferences stored as TOML

mod kv;
mod persistence;
mod settings;
pub mod snapshot;
mod sqlite;
mod ui_flags;

pub use kv::{KvStore, MemoryStore};
pub use persistence::Persistence;
pub use settings::{FreezeSettings, JournalSettings, MilestoneSettings, Settings};
pub use snapshot::Snapshot;
pub use sqlite::SqliteStore;
pub use ui_flags::UiFlags;

use std::path::PathBuf;

/// Returns `~/.config/rewire[-dev]/` based on REWIRE_ENV.
///
/// Set REWIRE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("REWIRE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("rewire-dev")
    } else {
        base_dir.join("rewire")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
