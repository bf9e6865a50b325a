//! Derived read model.
//!
//! A [`Summary`] is computed from the record, config and seen set at one
//! instant and never persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::{AppConfig, Milestone, Phase, TimelineEntry};
use crate::copy;
use crate::milestone::{current_phase, progress_pct, MilestoneEvaluator};
use crate::streak::{round_cents, StreakRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub app_id: String,
    pub unit_label: String,
    pub is_active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub current_days: u32,
    /// Longest of the completed streaks and the running one.
    pub best_streak: u32,
    pub longest_streak: u32,
    /// Completed streaks plus the running one.
    pub total_clean_days: u64,
    pub total_resets: u32,
    pub past_streaks: Vec<u32>,
    pub freezes_available: u32,
    pub freezes_used: u32,
    pub daily_cost: Option<f64>,
    pub money_saved: Option<f64>,
    /// Saved across every clean day, not just the running streak.
    pub lifetime_money_saved: Option<f64>,
    pub phase: Option<Phase>,
    pub next_milestone: Option<Milestone>,
    pub days_until_next: Option<u32>,
    pub unlocked_count: usize,
    pub seen_count: usize,
    pub goal_days: i64,
    pub progress_pct: f64,
    pub is_personal_best: bool,
    pub weeks: u32,
    pub months: u32,
    pub quote: Option<String>,
    pub weekly_message: Option<String>,
    pub journal_prompt: Option<String>,
    pub journal_entries: usize,
    pub timeline_reached: Vec<TimelineEntry>,
}

impl Summary {
    pub fn build(
        config: &AppConfig,
        record: &StreakRecord,
        seen: &BTreeSet<u32>,
        journal_entries: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let current_days = record.current_days(now);
        let evaluator = MilestoneEvaluator::new(&config.milestones);
        let weeks = copy::current_week(current_days);
        let total_clean_days = record.total_clean_days().saturating_add(u64::from(current_days));

        Self {
            app_id: config.id.clone(),
            unit_label: config.unit_label.clone(),
            is_active: record.is_active(),
            start_date: record.start_timestamp(),
            current_days,
            best_streak: record.longest_streak().max(current_days),
            longest_streak: record.longest_streak(),
            total_clean_days,
            total_resets: record.total_resets(),
            past_streaks: record.past_streaks().to_vec(),
            freezes_available: record.freezes_available(),
            freezes_used: record.freezes_used(),
            daily_cost: record.daily_cost(),
            money_saved: record.money_saved(now),
            lifetime_money_saved: record
                .daily_cost()
                .map(|cost| round_cents(cost * total_clean_days as f64)),
            phase: current_phase(&config.phases, current_days).cloned(),
            next_milestone: evaluator.next(current_days).cloned(),
            days_until_next: evaluator.days_until_next(current_days),
            unlocked_count: evaluator.unlocked(current_days).len(),
            seen_count: seen.len(),
            goal_days: config.goal_days,
            progress_pct: progress_pct(current_days, config.goal_days),
            is_personal_best: record.total_resets() > 0
                && current_days > 0
                && current_days >= record.longest_streak(),
            weeks,
            months: current_days / 30,
            quote: copy::quote_for_day(config, current_days).map(str::to_string),
            weekly_message: copy::weekly_message(config, weeks).map(str::to_string),
            journal_prompt: copy::journal_prompt(config, current_days).map(str::to_string),
            journal_entries,
            timeline_reached: config
                .recovery_timeline
                .iter()
                .filter(|t| t.day <= current_days)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::variants;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_unstarted_summary() {
        let cfg = variants::rewire();
        let summary = Summary::build(&cfg, &StreakRecord::new(), &BTreeSet::new(), 0, t0());
        assert!(!summary.is_active);
        assert_eq!(summary.current_days, 0);
        assert_eq!(summary.next_milestone.map(|m| m.day), Some(1));
        assert_eq!(summary.phase.map(|p| p.label), Some(cfg.phases[0].label.clone()));
        assert!(summary.money_saved.is_none());
        assert!(!summary.is_personal_best);
    }

    #[test]
    fn test_totals_include_running_streak() {
        let cfg = variants::rewire();
        let mut record = StreakRecord::new();
        record.start(t0()).unwrap();
        let now = t0() + Duration::days(10);
        record.reset(now);
        let later = now + Duration::days(12);
        record.set_daily_cost(5.50).unwrap();

        let summary = Summary::build(&cfg, &record, &BTreeSet::new(), 2, later);
        assert_eq!(summary.current_days, 12);
        assert_eq!(summary.longest_streak, 10);
        assert_eq!(summary.best_streak, 12);
        assert_eq!(summary.total_clean_days, 22);
        assert!(summary.is_personal_best);
        assert_eq!(summary.money_saved, Some(66.0));
        assert_eq!(summary.lifetime_money_saved, Some(121.0));
        assert_eq!(summary.weeks, 1);
        assert_eq!(summary.journal_entries, 2);
    }

    #[test]
    fn test_zero_day_resets_are_not_a_personal_best() {
        let cfg = variants::rewire();
        let mut record = StreakRecord::new();
        record.start(t0()).unwrap();
        record.reset(t0() + Duration::hours(2));
        record.reset(t0() + Duration::hours(5));

        let summary = Summary::build(&cfg, &record, &BTreeSet::new(), 0, t0() + Duration::hours(6));
        assert_eq!(summary.current_days, 0);
        assert_eq!(summary.longest_streak, 0);
        assert!(!summary.is_personal_best);
    }

    #[test]
    fn test_degenerate_goal() {
        let cfg = AppConfig {
            goal_days: 0,
            ..variants::rewire()
        };
        let mut record = StreakRecord::new();
        record.start(t0()).unwrap();
        let summary = Summary::build(&cfg, &record, &BTreeSet::new(), 0, t0() + Duration::days(47));
        assert_eq!(summary.progress_pct, 0.0);
    }

    #[test]
    fn test_camel_case_output() {
        let cfg = variants::rewire();
        let summary = Summary::build(&cfg, &StreakRecord::new(), &BTreeSet::new(), 0, t0());
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("currentDays").is_some());
        assert!(json.get("moneySaved").is_some());
        assert!(json.get("daysUntilNext").is_some());
    }
}
