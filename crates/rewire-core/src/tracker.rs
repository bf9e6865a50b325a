//! The tracker façade.
//!
//! Wires an [`AppConfig`] and a namespaced [`Persistence`] slot to the streak
//! record, journal and milestone evaluator. Every mutating call persists the
//! whole aggregate before returning; a failed write is logged and the
//! in-memory state stays authoritative for the session.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = Tracker::open(config, store, Box::new(SystemClock));
//! tracker.start()?;
//! // Later, on each render:
//! if let Some(event) = tracker.check_milestones() { /* celebrate */ }
//! ```

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::clock::Clock;
use crate::config::{AppConfig, Milestone, Phase};
use crate::error::ValidationError;
use crate::events::Event;
use crate::freeze::RechargePolicy;
use crate::journal::{Journal, JournalEntry};
use crate::live::LiveTime;
use crate::milestone::{current_phase, progress_pct, MilestoneEvaluator, SeenPolicy};
use crate::storage::snapshot::Restored;
use crate::storage::{KvStore, Persistence, Snapshot};
use crate::streak::{FreezeOutcome, StreakRecord};
use crate::summary::Summary;

pub struct Tracker {
    config: AppConfig,
    persistence: Persistence,
    clock: Box<dyn Clock>,
    policy: SeenPolicy,
    recharge: RechargePolicy,
    record: StreakRecord,
    journal: Journal,
    seen: BTreeSet<u32>,
    last_save_ok: bool,
}

impl Tracker {
    /// Load the `{config.id}-streak-data` slot from `store`.
    ///
    /// Never fails: a missing or corrupt snapshot yields a fresh record.
    pub fn open(config: AppConfig, store: Rc<dyn KvStore>, clock: Box<dyn Clock>) -> Self {
        let persistence = Persistence::new(store, config.id.clone());
        let Restored {
            record,
            journal,
            seen,
        } = persistence.load().restore();
        tracing::info!(
            "opened tracker for '{}' (active: {}, {} journal entries)",
            config.id,
            record.is_active(),
            journal.len()
        );
        Self {
            config,
            persistence,
            clock,
            policy: SeenPolicy::default(),
            recharge: RechargePolicy::default(),
            record,
            journal,
            seen: seen.unwrap_or_default(),
            last_save_ok: true,
        }
    }

    pub fn with_policy(mut self, policy: SeenPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_recharge(mut self, recharge: RechargePolicy) -> Self {
        self.recharge = recharge;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn record(&self) -> &StreakRecord {
        &self.record
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn seen_milestones(&self) -> &BTreeSet<u32> {
        &self.seen
    }

    pub fn policy(&self) -> SeenPolicy {
        self.policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Whether the most recent write reached the store.
    pub fn is_durable(&self) -> bool {
        self.last_save_ok
    }

    pub fn current_days(&self) -> u32 {
        self.record.current_days(self.now())
    }

    pub fn money_saved(&self) -> Option<f64> {
        self.record.money_saved(self.now())
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        current_phase(&self.config.phases, self.current_days())
    }

    pub fn next_milestone(&self) -> Option<&Milestone> {
        MilestoneEvaluator::new(&self.config.milestones).next(self.current_days())
    }

    pub fn unlocked_milestones(&self) -> Vec<&Milestone> {
        MilestoneEvaluator::new(&self.config.milestones).unlocked(self.current_days())
    }

    pub fn progress_pct(&self) -> f64 {
        progress_pct(self.current_days(), self.config.goal_days)
    }

    pub fn live_time(&self) -> LiveTime {
        LiveTime::between(self.record.start_timestamp(), self.now())
    }

    pub fn summary(&self) -> Summary {
        Summary::build(
            &self.config,
            &self.record,
            &self.seen,
            self.journal.len(),
            self.now(),
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    fn persist(&mut self) -> bool {
        let snapshot = Snapshot::capture(&self.record, &self.journal, &self.seen);
        self.last_save_ok = self.persistence.save(&snapshot);
        self.last_save_ok
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::AlreadyActive`] if a streak is running.
    pub fn start(&mut self) -> Result<Event, ValidationError> {
        let now = self.now();
        self.record.start(now)?;
        self.persist();
        tracing::info!("streak started for '{}'", self.config.id);
        Ok(Event::StreakStarted { at: now })
    }

    pub fn reset(&mut self) -> Event {
        let now = self.now();
        let outcome = self.record.reset(now);
        if self.policy == SeenPolicy::PerRun {
            self.seen.clear();
        }
        self.persist();
        tracing::info!(
            "streak reset after {} days (total resets: {})",
            outcome.finished_days,
            outcome.total_resets
        );
        Event::StreakReset {
            finished_days: outcome.finished_days,
            new_longest: outcome.new_longest,
            total_resets: outcome.total_resets,
            at: now,
        }
    }

    /// Spend a freeze. `FreezeExhausted` leaves everything untouched and the
    /// caller falls back to [`Tracker::reset`].
    pub fn use_freeze(&mut self) -> Event {
        let now = self.now();
        match self.record.use_freeze(now) {
            FreezeOutcome::Used { remaining } => {
                self.persist();
                tracing::info!("freeze used ({} remaining)", remaining);
                Event::FreezeUsed { remaining, at: now }
            }
            FreezeOutcome::Exhausted => {
                tracing::info!("freeze requested with none available");
                Event::FreezeExhausted { at: now }
            }
        }
    }

    /// Grant up to `count` freezes, bounded by the recharge cap.
    pub fn grant_freezes(&mut self, count: u32) -> Event {
        let now = self.now();
        let granted = self.record.grant_freezes(count, self.recharge.cap);
        if granted > 0 {
            self.persist();
            tracing::info!("granted {} freezes", granted);
        }
        Event::FreezesGranted {
            granted,
            available: self.record.freezes_available(),
            at: now,
        }
    }

    /// Apply the recharge policy. `None` when no token was earned.
    pub fn recharge_freezes(&mut self) -> Option<Event> {
        let now = self.now();
        if !self.recharge.apply(&mut self.record, now) {
            return None;
        }
        self.persist();
        Some(Event::FreezesGranted {
            granted: 1,
            available: self.record.freezes_available(),
            at: now,
        })
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDailyCost`] unless `amount` is
    /// finite and in `(0, 10000]`.
    pub fn set_daily_cost(&mut self, amount: f64) -> Result<Event, ValidationError> {
        self.record.set_daily_cost(amount)?;
        self.persist();
        tracing::info!("daily cost set to {:.2}", amount);
        Ok(Event::DailyCostSet {
            amount,
            at: self.now(),
        })
    }

    /// Mark newly-crossed milestones seen and return the one to celebrate.
    ///
    /// Repeated calls at the same day count return `None`.
    pub fn check_milestones(&mut self) -> Option<Event> {
        let now = self.now();
        let current_days = self.record.current_days(now);
        let crossed =
            MilestoneEvaluator::new(&self.config.milestones).evaluate(current_days, &mut self.seen)?;
        self.persist();
        tracing::info!("milestone reached: day {}", crossed.milestone.day);
        let Milestone {
            day,
            label,
            icon,
            message,
        } = crossed.milestone;
        Some(Event::MilestoneCrossed {
            day,
            label,
            icon,
            message,
            also_marked: crossed.also_marked,
            at: now,
        })
    }

    /// Add a journal entry. `text` is trimmed first.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a mood outside `1..=5` or text that
    /// is empty or longer than 1000 characters after trimming.
    pub fn add_journal_entry(
        &mut self,
        mood: u8,
        text: &str,
        triggers: Option<Vec<String>>,
    ) -> Result<Event, ValidationError> {
        let now = self.now();
        let entry = self.journal.add(mood, text.trim(), triggers, now)?;
        let event = Event::JournalEntryAdded {
            id: entry.id.clone(),
            mood: entry.mood,
            at: now,
        };
        self.persist();
        tracing::info!("journal entry added");
        Ok(event)
    }

    /// Remove an entry and hand it back with the event so the caller can
    /// offer undo.
    pub fn delete_journal_entry(&mut self, id: &str) -> Option<(Event, JournalEntry)> {
        let removed = self.journal.delete(id)?;
        self.persist();
        tracing::info!("journal entry {} deleted", id);
        let event = Event::JournalEntryDeleted {
            id: removed.id.clone(),
            at: self.now(),
        };
        Some((event, removed))
    }

    /// Whether a journal entry was written on today's (UTC) date.
    pub fn journaled_today(&self) -> bool {
        self.journal.has_entry_on(self.now().date_naive())
    }

    /// Reinsert a deleted entry with its original id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateEntry`] if the id is present.
    pub fn restore_journal_entry(&mut self, entry: JournalEntry) -> Result<Event, ValidationError> {
        let id = entry.id.clone();
        self.journal.restore(entry)?;
        self.persist();
        tracing::info!("journal entry {} restored", id);
        Ok(Event::JournalEntryRestored {
            id,
            at: self.now(),
        })
    }

    /// Remove the aggregate slot and start over in memory. UI flags are
    /// untouched.
    pub fn clear_all(&mut self) -> Event {
        self.record = StreakRecord::default();
        self.journal = Journal::default();
        self.seen.clear();
        self.last_save_ok = self.persistence.clear();
        tracing::info!("cleared all data for '{}'", self.config.id);
        Event::DataCleared { at: self.now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::variants;
    use crate::error::StoreError;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap()
    }

    fn setup() -> (Rc<MemoryStore>, ManualClock, Tracker) {
        let store = Rc::new(MemoryStore::new());
        let clock = ManualClock::new(t0());
        let tracker = Tracker::open(variants::rewire(), store.clone(), Box::new(clock.clone()));
        (store, clock, tracker)
    }

    fn reopen(store: &Rc<MemoryStore>, clock: &ManualClock) -> Tracker {
        Tracker::open(variants::rewire(), store.clone(), Box::new(clock.clone()))
    }

    #[test]
    fn test_every_mutation_persists() {
        let (store, clock, mut tracker) = setup();
        tracker.start().unwrap();
        clock.advance(Duration::days(3));
        tracker.set_daily_cost(4.0).unwrap();
        tracker.add_journal_entry(4, "  steady  ", None).unwrap();
        tracker.use_freeze();

        let reloaded = reopen(&store, &clock);
        assert_eq!(reloaded.record(), tracker.record());
        assert_eq!(reloaded.journal(), tracker.journal());
        assert_eq!(reloaded.journal().entries()[0].text, "steady");
        assert_eq!(reloaded.current_days(), 3);
    }

    #[test]
    fn test_start_twice_fails() {
        let (_, _, mut tracker) = setup();
        tracker.start().unwrap();
        assert_eq!(tracker.start(), Err(ValidationError::AlreadyActive));
    }

    #[test]
    fn test_freeze_exhaustion() {
        let (_, _, mut tracker) = setup();
        tracker.start().unwrap();
        assert!(matches!(tracker.use_freeze(), Event::FreezeUsed { remaining: 1, .. }));
        assert!(matches!(tracker.use_freeze(), Event::FreezeUsed { remaining: 0, .. }));
        let before = tracker.record().clone();
        assert!(matches!(tracker.use_freeze(), Event::FreezeExhausted { .. }));
        assert_eq!(tracker.record(), &before);
    }

    #[test]
    fn test_milestone_fires_once_and_survives_reopen() {
        let (store, clock, mut tracker) = setup();
        tracker.start().unwrap();
        clock.advance(Duration::days(7));

        match tracker.check_milestones() {
            Some(Event::MilestoneCrossed {
                day, also_marked, ..
            }) => {
                assert_eq!(day, 7);
                assert_eq!(also_marked, vec![1, 3]);
            }
            other => panic!("expected milestone, got {other:?}"),
        }
        assert!(tracker.check_milestones().is_none());

        let mut reloaded = reopen(&store, &clock);
        assert!(reloaded.check_milestones().is_none());
    }

    #[test]
    fn test_lifetime_policy_does_not_refire_after_reset() {
        let (_, clock, mut tracker) = setup();
        tracker.start().unwrap();
        clock.advance(Duration::days(3));
        assert!(tracker.check_milestones().is_some());

        tracker.reset();
        clock.advance(Duration::days(3));
        assert!(tracker.check_milestones().is_none());
    }

    #[test]
    fn test_per_run_policy_refires_after_reset() {
        let (store, clock, _) = setup();
        let mut tracker = reopen(&store, &clock).with_policy(SeenPolicy::PerRun);
        tracker.start().unwrap();
        clock.advance(Duration::days(3));
        assert!(tracker.check_milestones().is_some());

        tracker.reset();
        assert!(tracker.seen_milestones().is_empty());
        clock.advance(Duration::days(3));
        assert!(matches!(
            tracker.check_milestones(),
            Some(Event::MilestoneCrossed { day: 3, .. })
        ));
    }

    #[test]
    fn test_failed_writes_keep_session_state() {
        let (store, clock, mut tracker) = setup();
        store.fail_writes(Some(StoreError::QuotaExceeded));

        tracker.start().unwrap();
        assert!(!tracker.is_durable());
        clock.advance(Duration::days(2));
        assert_eq!(tracker.current_days(), 2);
        assert!(tracker.record().is_active());

        let reloaded = reopen(&store, &clock);
        assert!(!reloaded.record().is_active());
    }

    #[test]
    fn test_journal_delete_and_restore() {
        let (store, clock, mut tracker) = setup();
        let id = match tracker.add_journal_entry(2, "craving after lunch", None).unwrap() {
            Event::JournalEntryAdded { id, .. } => id,
            other => panic!("unexpected {other:?}"),
        };
        let (event, removed) = tracker.delete_journal_entry(&id).unwrap();
        assert!(matches!(event, Event::JournalEntryDeleted { id: ref deleted, .. } if *deleted == id));
        assert!(tracker.journal().is_empty());
        assert!(tracker.delete_journal_entry(&id).is_none());

        tracker.restore_journal_entry(removed.clone()).unwrap();
        assert_eq!(reopen(&store, &clock).journal().entries(), &[removed]);
    }

    #[test]
    fn test_recharge_and_grant() {
        let (_, clock, mut tracker) = setup();
        tracker.start().unwrap();
        tracker.use_freeze();
        assert!(tracker.recharge_freezes().is_none());

        clock.advance(Duration::days(7));
        assert!(tracker.recharge_freezes().is_some());
        assert_eq!(tracker.record().freezes_available(), 2);

        assert!(matches!(
            tracker.grant_freezes(3),
            Event::FreezesGranted { granted: 0, available: 2, .. }
        ));
    }

    #[test]
    fn test_clear_all_keeps_ui_flags() {
        let (store, clock, mut tracker) = setup();
        tracker.start().unwrap();
        store.insert_raw("rewire-ui-welcome-seen", "true");

        tracker.clear_all();
        assert!(!tracker.record().is_active());
        assert_eq!(store.keys(), vec!["rewire-ui-welcome-seen".to_string()]);
        assert!(!reopen(&store, &clock).record().is_active());
    }

    #[test]
    fn test_journaled_today_follows_clock() {
        let (_, clock, mut tracker) = setup();
        assert!(!tracker.journaled_today());
        tracker.add_journal_entry(4, "slept well", None).unwrap();
        assert!(tracker.journaled_today());
        clock.advance(Duration::days(1));
        assert!(!tracker.journaled_today());
    }

    #[test]
    fn test_saturated_counters_do_not_overflow() {
        let (store, clock, _) = setup();
        store.insert_raw(
            "rewire-streak-data",
            r#"{"startDate":"2025-12-01T09:00:00Z","isActive":true,"totalResets":4294967295,"freezesUsed":4294967295,"totalCleanDays":18446744073709551615}"#,
        );
        let mut tracker = reopen(&store, &clock);

        assert!(matches!(tracker.use_freeze(), Event::FreezeUsed { remaining: 1, .. }));
        assert_eq!(tracker.record().freezes_used(), u32::MAX);

        assert!(matches!(
            tracker.reset(),
            Event::StreakReset { finished_days: 31, total_resets: u32::MAX, .. }
        ));
        assert_eq!(tracker.record().total_clean_days(), u64::MAX);
        assert_eq!(tracker.summary().total_clean_days, u64::MAX);
    }

    #[test]
    fn test_active_flag_without_start_can_start() {
        let (store, clock, _) = setup();
        store.insert_raw(
            "rewire-streak-data",
            r#"{"startDate":null,"isActive":true}"#,
        );
        let mut tracker = reopen(&store, &clock);
        assert!(!tracker.record().is_active());
        assert!(tracker.start().is_ok());
        assert_eq!(tracker.record().start_timestamp(), Some(t0()));
    }
}
