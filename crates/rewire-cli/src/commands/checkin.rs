use serde::Serialize;

use rewire_core::copy;

use super::context::Context;
use super::{print_json, CmdResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckInOutput<'a> {
    day: u32,
    message: &'a str,
    already_checked_in: bool,
    journaled_today: bool,
}

/// Answer today's check-in. Only offered once a streak has reached day 1.
pub fn run() -> CmdResult {
    let ctx = Context::open()?;
    let days = ctx.tracker.current_days();
    if days == 0 {
        return Err("nothing to check in yet; come back after your first full day".into());
    }

    let today = ctx.tracker.now().date_naive();
    let already_checked_in = ctx.flags.checked_in_on(today);
    if !already_checked_in {
        ctx.flags.check_in(today);
    }

    print_json(&CheckInOutput {
        day: days,
        message: copy::check_in_message(days),
        already_checked_in,
        journaled_today: ctx.tracker.journaled_today(),
    })?;
    Ok(())
}
