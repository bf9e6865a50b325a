//! The streak aggregate and its mutating operations.
//!
//! ## Lifecycle
//!
//! ```text
//! Inactive --start()--> Active --reset()--> Active (clock restarted)
//!                         |
//!                         +--use_freeze()--> Active (clock untouched)
//! ```
//!
//! Day counts are recomputed on every query from the raw start instant:
//! there is no incrementing counter to drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MS_PER_DAY: i64 = 86_400_000;
pub const MAX_DAILY_COST: f64 = 10_000.0;
/// Freezes granted to a brand new record.
pub const INITIAL_FREEZES: u32 = 2;

/// Whole days elapsed between `start` and `now`.
///
/// A `start` in the future (clock skew) yields 0.
pub fn days_between(start: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let elapsed_ms = (now - start).num_milliseconds().max(0);
    u32::try_from(elapsed_ms / MS_PER_DAY).unwrap_or(u32::MAX)
}

/// Round a currency amount to cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Result of a finished streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    /// Length of the streak that just ended (0 if it ended on day 0).
    pub finished_days: u32,
    /// Whether this streak set a new longest record.
    pub new_longest: bool,
    pub total_resets: u32,
}

/// Result of trying to absorb a lapse with a freeze token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FreezeOutcome {
    Used { remaining: u32 },
    /// No tokens left; the caller must fall back to a reset.
    Exhausted,
}

impl FreezeOutcome {
    pub fn is_used(&self) -> bool {
        matches!(self, FreezeOutcome::Used { .. })
    }
}

/// The single streak record of an installation.
#[derive(Debug, Clone, PartialEq)]
pub struct StreakRecord {
    pub(crate) start: Option<DateTime<Utc>>,
    pub(crate) active: bool,
    pub(crate) freezes_available: u32,
    pub(crate) freezes_used: u32,
    pub(crate) last_freeze_recharge: Option<DateTime<Utc>>,
    pub(crate) longest_streak: u32,
    pub(crate) total_resets: u32,
    pub(crate) total_clean_days: u64,
    pub(crate) past_streaks: Vec<u32>,
    pub(crate) daily_cost: Option<f64>,
}

impl Default for StreakRecord {
    fn default() -> Self {
        Self {
            start: None,
            active: false,
            freezes_available: INITIAL_FREEZES,
            freezes_used: 0,
            last_freeze_recharge: None,
            longest_streak: 0,
            total_resets: 0,
            total_clean_days: 0,
            past_streaks: Vec::new(),
            daily_cost: None,
        }
    }
}

impl StreakRecord {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn start_timestamp(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn freezes_available(&self) -> u32 {
        self.freezes_available
    }

    pub fn freezes_used(&self) -> u32 {
        self.freezes_used
    }

    pub fn last_freeze_recharge(&self) -> Option<DateTime<Utc>> {
        self.last_freeze_recharge
    }

    /// Longest *completed* streak. Does not include the running one.
    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn total_resets(&self) -> u32 {
        self.total_resets
    }

    /// Sum of completed streak lengths, excluding the running one.
    pub fn total_clean_days(&self) -> u64 {
        self.total_clean_days
    }

    pub fn past_streaks(&self) -> &[u32] {
        &self.past_streaks
    }

    pub fn daily_cost(&self) -> Option<f64> {
        self.daily_cost
    }

    /// Whole days since the current start, never negative.
    pub fn current_days(&self, now: DateTime<Utc>) -> u32 {
        self.start
            .map(|start| days_between(start, now))
            .unwrap_or(0)
    }

    /// `daily_cost × current_days`, rounded to cents. `None` until a cost is set.
    pub fn money_saved(&self, now: DateTime<Utc>) -> Option<f64> {
        self.daily_cost
            .map(|cost| round_cents(cost * f64::from(self.current_days(now))))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the first streak.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AlreadyActive`] if a streak is running.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.active {
            return Err(ValidationError::AlreadyActive);
        }
        self.start = Some(now);
        self.active = true;
        Ok(())
    }

    /// Record a setback: close the running streak and restart the clock.
    ///
    /// A zero-day streak still counts as a reset but is not recorded in the
    /// history. Resetting a record that was never started starts it.
    pub fn reset(&mut self, now: DateTime<Utc>) -> ResetOutcome {
        let finished_days = self.current_days(now);
        let new_longest = finished_days > self.longest_streak;

        if finished_days > 0 {
            self.past_streaks.push(finished_days);
            self.total_clean_days = self
                .total_clean_days
                .saturating_add(u64::from(finished_days));
            self.longest_streak = self.longest_streak.max(finished_days);
        }
        self.total_resets = self.total_resets.saturating_add(1);
        self.start = Some(now);
        self.active = true;

        ResetOutcome {
            finished_days,
            new_longest,
            total_resets: self.total_resets,
        }
    }

    /// Spend a freeze token instead of resetting. The clock keeps running.
    ///
    /// Using a freeze also restarts the recharge window.
    pub fn use_freeze(&mut self, now: DateTime<Utc>) -> FreezeOutcome {
        if self.freezes_available == 0 {
            return FreezeOutcome::Exhausted;
        }
        self.freezes_available -= 1;
        self.freezes_used = self.freezes_used.saturating_add(1);
        self.last_freeze_recharge = Some(now);
        FreezeOutcome::Used {
            remaining: self.freezes_available,
        }
    }

    /// Add up to `count` freezes without exceeding `cap`. Returns how many
    /// were actually granted.
    pub fn grant_freezes(&mut self, count: u32, cap: u32) -> u32 {
        let target = self.freezes_available.saturating_add(count).min(cap);
        let granted = target.saturating_sub(self.freezes_available);
        self.freezes_available += granted;
        granted
    }

    pub(crate) fn mark_recharged(&mut self, now: DateTime<Utc>) {
        self.last_freeze_recharge = Some(now);
    }

    /// Set the user's daily spend on the habit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDailyCost`] unless `amount` is
    /// finite and in `(0, 10000]`.
    pub fn set_daily_cost(&mut self, amount: f64) -> Result<(), ValidationError> {
        if !is_valid_daily_cost(amount) {
            return Err(ValidationError::InvalidDailyCost { value: amount });
        }
        self.daily_cost = Some(amount);
        Ok(())
    }
}

pub fn is_valid_daily_cost(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0 && amount <= MAX_DAILY_COST
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap()
    }

    fn active_since(days_ago: i64, now: DateTime<Utc>) -> StreakRecord {
        let mut record = StreakRecord::new();
        record.start(now - Duration::days(days_ago)).unwrap();
        record
    }

    #[test]
    fn test_day_boundaries() {
        let start = t0();
        let almost = Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59);
        assert_eq!(days_between(start, start), 0);
        assert_eq!(days_between(start, start + almost), 0);
        assert_eq!(days_between(start, start + Duration::hours(24)), 1);
        assert_eq!(days_between(start, start + Duration::days(90)), 90);
        assert_eq!(days_between(start, start + Duration::days(365)), 365);
    }

    #[test]
    fn test_future_start_clamps_to_zero() {
        let start = t0();
        assert_eq!(days_between(start, start - Duration::days(1)), 0);
        assert_eq!(days_between(start, start - Duration::milliseconds(1)), 0);
    }

    #[test]
    fn test_never_started_has_zero_days() {
        let record = StreakRecord::new();
        assert!(!record.is_active());
        assert_eq!(record.current_days(t0()), 0);
        assert_eq!(record.freezes_available(), INITIAL_FREEZES);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut record = StreakRecord::new();
        record.start(t0()).unwrap();
        assert_eq!(record.start(t0()), Err(ValidationError::AlreadyActive));
        assert_eq!(record.start_timestamp(), Some(t0()));
    }

    #[test]
    fn test_start_leaves_lifetime_counters() {
        let mut record = StreakRecord::new();
        record.start(t0()).unwrap();
        assert_eq!(record.longest_streak(), 0);
        assert_eq!(record.total_resets(), 0);
        assert_eq!(record.total_clean_days(), 0);
        assert!(record.past_streaks().is_empty());
    }

    #[test]
    fn test_reset_on_day_zero_counts_without_history() {
        let now = t0();
        let mut record = active_since(0, now);
        let outcome = record.reset(now + Duration::hours(3));

        assert_eq!(outcome.finished_days, 0);
        assert!(!outcome.new_longest);
        assert_eq!(record.total_resets(), 1);
        assert!(record.past_streaks().is_empty());
        assert_eq!(record.total_clean_days(), 0);
        assert!(record.is_active());
    }

    #[test]
    fn test_reset_records_finished_streak() {
        let now = t0();
        let mut record = active_since(12, now);
        let outcome = record.reset(now);

        assert_eq!(outcome.finished_days, 12);
        assert!(outcome.new_longest);
        assert_eq!(record.past_streaks(), &[12]);
        assert_eq!(record.total_clean_days(), 12);
        assert_eq!(record.longest_streak(), 12);
        assert_eq!(record.start_timestamp(), Some(now));
        assert_eq!(record.current_days(now), 0);
    }

    #[test]
    fn test_reset_never_lowers_longest() {
        let mut now = t0();
        let mut record = active_since(20, now);
        record.reset(now);
        now += Duration::days(5);
        let outcome = record.reset(now);

        assert!(!outcome.new_longest);
        assert_eq!(record.longest_streak(), 20);
        assert_eq!(record.past_streaks(), &[20, 5]);
        assert_eq!(record.total_clean_days(), 25);
        assert_eq!(record.total_resets(), 2);
    }

    #[test]
    fn test_reset_before_start_activates() {
        let mut record = StreakRecord::new();
        let outcome = record.reset(t0());
        assert_eq!(outcome.finished_days, 0);
        assert!(record.is_active());
        assert_eq!(record.total_resets(), 1);
    }

    #[test]
    fn test_freeze_exhausted_mutates_nothing() {
        let now = t0();
        let mut record = active_since(3, now);
        record.freezes_available = 0;
        let before = record.clone();

        assert_eq!(record.use_freeze(now), FreezeOutcome::Exhausted);
        assert_eq!(record, before);
    }

    #[test]
    fn test_freeze_keeps_clock_and_history() {
        let now = t0();
        let mut record = active_since(10, now);
        record.past_streaks = vec![4, 9];
        let start = record.start_timestamp();

        let outcome = record.use_freeze(now);
        assert_eq!(outcome, FreezeOutcome::Used { remaining: 1 });
        assert_eq!(record.freezes_available(), 1);
        assert_eq!(record.freezes_used(), 1);
        assert_eq!(record.start_timestamp(), start);
        assert_eq!(record.past_streaks(), &[4, 9]);
        assert_eq!(record.total_resets(), 0);
        assert_eq!(record.current_days(now), 10);
    }

    #[test]
    fn test_grant_freezes_respects_cap() {
        let mut record = StreakRecord::new();
        record.freezes_available = 1;
        assert_eq!(record.grant_freezes(5, 3), 2);
        assert_eq!(record.freezes_available(), 3);
        assert_eq!(record.grant_freezes(1, 3), 0);
        assert_eq!(record.freezes_available(), 3);
    }

    #[test]
    fn test_daily_cost_bounds() {
        let mut record = StreakRecord::new();
        for bad in [0.0, -1.0, 10_000.01, f64::NAN, f64::INFINITY] {
            assert!(record.set_daily_cost(bad).is_err(), "{bad} should be rejected");
        }
        assert!(record.daily_cost().is_none());

        record.set_daily_cost(10_000.0).unwrap();
        record.set_daily_cost(0.01).unwrap();
        assert_eq!(record.daily_cost(), Some(0.01));
    }

    #[test]
    fn test_money_saved() {
        let now = t0();
        let mut record = active_since(47, now);
        assert!(record.money_saved(now).is_none());
        record.set_daily_cost(5.50).unwrap();
        assert_eq!(record.money_saved(now), Some(258.50));
    }

    proptest! {
        #[test]
        fn prop_days_match_floor_and_are_monotonic(
            offset_ms in 0i64..(400 * MS_PER_DAY),
            step_ms in 0i64..(10 * MS_PER_DAY),
        ) {
            let start = t0();
            let now = start + Duration::milliseconds(offset_ms);
            let later = now + Duration::milliseconds(step_ms);
            prop_assert_eq!(i64::from(days_between(start, now)), offset_ms / MS_PER_DAY);
            prop_assert!(days_between(start, later) >= days_between(start, now));
        }

        #[test]
        fn prop_future_start_is_zero(deficit_ms in 1i64..(1000 * MS_PER_DAY)) {
            let start = t0();
            prop_assert_eq!(days_between(start, start - Duration::milliseconds(deficit_ms)), 0);
        }

        #[test]
        fn prop_reset_accounting(gaps in proptest::collection::vec(0i64..120, 1..20)) {
            let mut now = t0();
            let mut record = StreakRecord::new();
            record.start(now).unwrap();

            for gap in &gaps {
                now += Duration::days(*gap);
                record.reset(now);
            }

            let expected_sum: u64 = gaps.iter().map(|g| *g as u64).sum();
            let expected_max = gaps.iter().copied().max().unwrap_or(0) as u32;
            prop_assert_eq!(record.total_clean_days(), expected_sum);
            prop_assert_eq!(record.longest_streak(), expected_max);
            prop_assert_eq!(record.total_resets() as usize, gaps.len());
            prop_assert_eq!(
                record.past_streaks().len(),
                gaps.iter().filter(|g| **g > 0).count()
            );
        }
    }
}
