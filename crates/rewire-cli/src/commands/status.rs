use chrono::{DateTime, Utc};
use serde::Serialize;

use rewire_core::{copy, Event, MilestoneEvaluator, Summary};

use super::context::Context;
use super::{print_json, CmdResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    #[serde(flatten)]
    summary: Summary,
    /// Set on the first status of a fresh install.
    first_run: bool,
    previous_visit: Option<DateTime<Utc>>,
    recap: Option<String>,
    celebration: Option<Event>,
    checked_in_today: bool,
    journaled_today: bool,
}

pub fn run() -> CmdResult {
    let mut ctx = Context::open()?;
    let now = ctx.tracker.now();

    let first_run = !ctx.flags.welcome_seen();
    if first_run {
        ctx.flags.mark_welcome_seen();
    }
    let previous_visit = ctx.flags.record_visit(now);
    let celebration = ctx.tracker.check_milestones();
    let summary = ctx.tracker.summary();
    let recap = copy::recap_due(summary.current_days).then(|| copy::week_label(summary.weeks));
    let checked_in_today = ctx.flags.checked_in_on(now.date_naive());
    let journaled_today = ctx.tracker.journaled_today();

    print_json(&StatusOutput {
        summary,
        first_run,
        previous_visit,
        recap,
        celebration,
        checked_in_today,
        journaled_today,
    })?;
    Ok(())
}

#[derive(Serialize)]
struct MilestoneRow<'a> {
    day: u32,
    label: &'a str,
    icon: &'a str,
    unlocked: bool,
    seen: bool,
}

pub fn milestones() -> CmdResult {
    let ctx = Context::open()?;
    let current_days = ctx.tracker.current_days();
    let config = ctx.tracker.config();
    let unlocked: Vec<u32> = MilestoneEvaluator::new(&config.milestones)
        .unlocked(current_days)
        .iter()
        .map(|m| m.day)
        .collect();
    let seen = ctx.tracker.seen_milestones();

    let rows: Vec<MilestoneRow> = config
        .milestones
        .iter()
        .map(|m| MilestoneRow {
            day: m.day,
            label: &m.label,
            icon: &m.icon,
            unlocked: unlocked.contains(&m.day),
            seen: seen.contains(&m.day),
        })
        .collect();
    print_json(&rows)?;
    Ok(())
}
