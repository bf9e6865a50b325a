use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_MIN_GAP_MS: u64 = 600;

/// Guards irreversible actions against rapid double activation.
///
/// The engine's `reset` and `use_freeze` are not idempotent; callers ask
/// [`Debouncer::try_acquire`] before invoking them.
#[derive(Debug, Clone)]
pub struct Debouncer {
    min_gap: Duration,
    last: Option<DateTime<Utc>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_GAP_MS)
    }
}

impl Debouncer {
    pub fn new(min_gap_ms: u64) -> Self {
        Self {
            min_gap: Duration::milliseconds(i64::try_from(min_gap_ms).unwrap_or(i64::MAX)),
            last: None,
        }
    }

    /// Resume from a previously accepted instant (e.g. persisted across runs).
    pub fn with_last(mut self, last: Option<DateTime<Utc>>) -> Self {
        self.last = last;
        self
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.last
    }

    /// `true` and remember `now` if the gap since the last accepted action
    /// is at least the minimum. A clock that moved backwards is allowed.
    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> bool {
        let allowed = match self.last {
            Some(last) if now >= last => now - last >= self.min_gap,
            _ => true,
        };
        if allowed {
            self.last = Some(now);
        } else {
            tracing::debug!("debounced action at {}", now);
        }
        allowed
    }
}
