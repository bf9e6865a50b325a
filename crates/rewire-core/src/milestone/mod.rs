//! Milestone evaluation.
//!
//! Pure functions of `(current_days, milestones, seen)`. Milestones are
//! finite and can run out; phases (see [`phase`]) always resolve.

pub mod phase;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::Milestone;

pub use phase::{current_phase, progress_pct};

/// Whether a reset makes thresholds celebrate again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeenPolicy {
    /// Each threshold celebrates once over the lifetime of the install.
    #[default]
    Lifetime,
    /// A reset clears the seen set; thresholds fire again in the next run.
    PerRun,
}

/// A celebration to show. Only the highest newly-crossed threshold is
/// celebrated; the rest are listed in `also_marked` and silently marked seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneCrossed {
    pub milestone: Milestone,
    pub also_marked: Vec<u32>,
}

pub struct MilestoneEvaluator<'a> {
    milestones: &'a [Milestone],
}

impl<'a> MilestoneEvaluator<'a> {
    pub fn new(milestones: &'a [Milestone]) -> Self {
        Self { milestones }
    }

    /// All milestones with `day <= current_days`.
    pub fn unlocked(&self, current_days: u32) -> Vec<&'a Milestone> {
        self.milestones
            .iter()
            .filter(|m| m.day <= current_days)
            .collect()
    }

    /// The smallest milestone strictly ahead, or `None` once every
    /// configured day has passed.
    pub fn next(&self, current_days: u32) -> Option<&'a Milestone> {
        self.milestones
            .iter()
            .filter(|m| m.day > current_days)
            .min_by_key(|m| m.day)
    }

    pub fn days_until_next(&self, current_days: u32) -> Option<u32> {
        self.next(current_days).map(|m| m.day - current_days)
    }

    /// Unlocked milestones not yet in `seen`, ascending by day.
    pub fn newly_crossed(&self, current_days: u32, seen: &BTreeSet<u32>) -> Vec<&'a Milestone> {
        let mut crossed: Vec<&Milestone> = self
            .unlocked(current_days)
            .into_iter()
            .filter(|m| !seen.contains(&m.day))
            .collect();
        crossed.sort_by_key(|m| m.day);
        crossed
    }

    /// Mark every newly-crossed milestone seen and return the one to
    /// celebrate. Calling again with the same inputs returns `None`.
    pub fn evaluate(&self, current_days: u32, seen: &mut BTreeSet<u32>) -> Option<MilestoneCrossed> {
        let mut crossed = self.newly_crossed(current_days, seen);
        let highest = crossed.pop()?;

        let also_marked: Vec<u32> = crossed.iter().map(|m| m.day).collect();
        seen.extend(also_marked.iter().copied());
        seen.insert(highest.day);

        tracing::debug!(
            "milestone {} crossed at day {} ({} silently marked)",
            highest.day,
            current_days,
            also_marked.len()
        );

        Some(MilestoneCrossed {
            milestone: highest.clone(),
            also_marked,
        })
    }
}
