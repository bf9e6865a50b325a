use chrono::{DateTime, NaiveDate, Utc};
use std::rc::Rc;

use super::kv::KvStore;
use crate::journal::Trash;

/// Single-value keys owned by the presentation layer.
///
/// Keys are `{appId}-ui-{name}`, beside the aggregate slot but
/// never read or written by [`super::Persistence`]. Every failure is logged
/// and swallowed: a flag that cannot be stored is simply shown again.
pub struct UiFlags {
    store: Rc<dyn KvStore>,
    namespace: String,
}

impl UiFlags {
    pub fn new(store: Rc<dyn KvStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}-ui-{}", self.namespace, name)
    }

    fn read(&self, name: &str) -> Option<String> {
        let key = self.key(name);
        match self.store.get(&key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn write(&self, name: &str, value: &str) {
        let key = self.key(name);
        if let Err(e) = self.store.set(&key, value) {
            tracing::warn!("failed to write {}: {}", key, e);
        }
    }

    fn read_time(&self, name: &str) -> Option<DateTime<Utc>> {
        let raw = self.read(name)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .ok()
    }

    pub fn welcome_seen(&self) -> bool {
        self.read("welcome-seen").as_deref() == Some("true")
    }

    pub fn mark_welcome_seen(&self) {
        self.write("welcome-seen", "true");
    }

    /// Whether the daily check-in was already answered on `date`.
    pub fn checked_in_on(&self, date: NaiveDate) -> bool {
        self.read("last-checkin")
            .and_then(|raw| raw.parse::<NaiveDate>().ok())
            == Some(date)
    }

    pub fn check_in(&self, date: NaiveDate) {
        self.write("last-checkin", &date.to_string());
    }

    /// Store `now` as the last visit and return the previous one.
    pub fn record_visit(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let previous = self.read_time("last-visit");
        self.write("last-visit", &now.to_rfc3339());
        previous
    }

    /// Time of the last destructive action, for debouncing across runs.
    pub fn last_action(&self) -> Option<DateTime<Utc>> {
        self.read_time("last-action")
    }

    pub fn set_last_action(&self, at: DateTime<Utc>) {
        self.write("last-action", &at.to_rfc3339());
    }

    /// The journal undo buffer with a restore window of `ttl_secs`. An
    /// unreadable value yields an empty trash.
    pub fn load_trash(&self, ttl_secs: u64) -> Trash {
        self.read("journal-trash")
            .and_then(|raw| match serde_json::from_str::<Trash>(&raw) {
                Ok(trash) => Some(trash),
                Err(e) => {
                    tracing::warn!("discarding unreadable journal trash: {}", e);
                    None
                }
            })
            .unwrap_or_default()
            .with_ttl_secs(ttl_secs)
    }

    pub fn save_trash(&self, trash: &Trash) {
        match serde_json::to_string(trash) {
            Ok(raw) => self.write("journal-trash", &raw),
            Err(e) => tracing::warn!("failed to encode journal trash: {}", e),
        }
    }
}
