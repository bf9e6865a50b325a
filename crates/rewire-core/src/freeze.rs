//! Freeze token replenishment.
//!
//! The streak record only spends and receives tokens; when tokens are
//! granted is decided here. The default policy grants one token for every
//! `interval_days` of uninterrupted streak, up to `cap`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::FreezeSettings;
use crate::streak::{days_between, StreakRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RechargePolicy {
    pub cap: u32,
    pub interval_days: u32,
}

impl Default for RechargePolicy {
    fn default() -> Self {
        Self {
            cap: 2,
            interval_days: 7,
        }
    }
}

impl From<&FreezeSettings> for RechargePolicy {
    fn from(settings: &FreezeSettings) -> Self {
        Self {
            cap: settings.cap,
            interval_days: settings.recharge_days,
        }
    }
}

impl RechargePolicy {
    /// Grant one freeze if the record has earned it. Returns whether a token
    /// was added.
    ///
    /// The window is measured from the last recharge (or freeze use), or
    /// from the streak start when there has been none. An interval of 0
    /// disables recharging.
    pub fn apply(&self, record: &mut StreakRecord, now: DateTime<Utc>) -> bool {
        if self.interval_days == 0 || !record.is_active() {
            return false;
        }
        if record.freezes_available() >= self.cap {
            return false;
        }

        let current_days = record.current_days(now);
        let since_recharge = record
            .last_freeze_recharge()
            .map(|at| days_between(at, now))
            .unwrap_or(current_days);

        if current_days < self.interval_days || since_recharge < self.interval_days {
            return false;
        }

        let granted = record.grant_freezes(1, self.cap);
        record.mark_recharged(now);
        granted > 0
    }
}
