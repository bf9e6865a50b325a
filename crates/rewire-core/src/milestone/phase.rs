//! Phase resolution and goal progress.

use crate::config::Phase;

/// The first phase whose `max_day` is beyond `current_days`, else the
/// terminal (last) phase. `None` only for a config with no phases.
pub fn current_phase(phases: &[Phase], current_days: u32) -> Option<&Phase> {
    phases
        .iter()
        .find(|p| p.max_day > current_days)
        .or_else(|| phases.last())
}

/// 0.0 ..= 100.0 progress towards `goal_days`. A non-positive goal yields 0.
pub fn progress_pct(current_days: u32, goal_days: i64) -> f64 {
    if goal_days <= 0 {
        return 0.0;
    }
    (f64::from(current_days) / goal_days as f64 * 100.0).min(100.0)
}
