use std::rc::Rc;

use super::kv::KvStore;
use super::snapshot::{sanitize_seen, Snapshot};

/// Raw legacy seen-set values longer than this are ignored.
const MAX_LEGACY_RAW_LEN: usize = 1024;
/// Only this many legacy thresholds are carried over.
const MAX_LEGACY_ENTRIES: usize = 50;

/// A default snapshot that still consults the legacy seen key.
fn fresh() -> Snapshot {
    Snapshot {
        seen_milestones: None,
        ..Snapshot::default()
    }
}

/// The `{appId}-streak-data` slot.
///
/// Loading never fails: a missing, unreadable or corrupt value yields the
/// default snapshot. Saving reports success but never errors; a failed write
/// is logged and the caller keeps its in-memory state.
pub struct Persistence {
    store: Rc<dyn KvStore>,
    namespace: String,
}

impl Persistence {
    pub fn new(store: Rc<dyn KvStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> String {
        format!("{}-streak-data", self.namespace)
    }

    fn legacy_seen_key(&self) -> String {
        format!("{}-seen-milestones", self.namespace)
    }

    pub fn load(&self) -> Snapshot {
        let key = self.key();
        let mut snapshot = match self.store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Snapshot>(&raw) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!("corrupt snapshot at {}, starting fresh: {}", key, e);
                    fresh()
                }
            },
            Ok(None) => fresh(),
            Err(e) => {
                tracing::warn!("failed to read {}, starting fresh: {}", key, e);
                fresh()
            }
        };

        if snapshot.seen_milestones.is_none() {
            snapshot.seen_milestones = Some(self.load_legacy_seen());
        }
        snapshot
    }

    /// Seen thresholds stored under the pre-aggregate key, if any.
    fn load_legacy_seen(&self) -> Vec<u32> {
        let key = self.legacy_seen_key();
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) if raw.len() <= MAX_LEGACY_RAW_LEN => raw,
            Ok(Some(_)) => {
                tracing::warn!("ignoring oversized legacy value at {}", key);
                return Vec::new();
            }
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read {}: {}", key, e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<u32>>(&raw) {
            Ok(days) => {
                tracing::info!("migrated {} seen milestones from {}", days.len(), key);
                sanitize_seen(days.into_iter().take(MAX_LEGACY_ENTRIES))
                    .into_iter()
                    .collect()
            }
            Err(e) => {
                tracing::warn!("ignoring unreadable legacy value at {}: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Write the whole aggregate. Returns `false` if the write failed.
    pub fn save(&self, snapshot: &Snapshot) -> bool {
        let key = self.key();
        let raw = match serde_json::to_string(snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("failed to encode snapshot: {}", e);
                return false;
            }
        };
        match self.store.set(&key, &raw) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to save {}: {}", key, e);
                false
            }
        }
    }

    /// Remove the aggregate and the legacy seen key. Returns `false` if
    /// either removal failed.
    pub fn clear(&self) -> bool {
        let mut ok = true;
        for key in [self.key(), self.legacy_seen_key()] {
            if let Err(e) = self.store.remove(&key) {
                tracing::warn!("failed to remove {}: {}", key, e);
                ok = false;
            }
        }
        ok
    }
}
