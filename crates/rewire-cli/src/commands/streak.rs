use rewire_core::Event;

use super::context::Context;
use super::{print_json, CmdResult};

pub fn start() -> CmdResult {
    let mut ctx = Context::open()?;
    let event = ctx.tracker.start()?;
    print_json(&event)?;
    Ok(())
}

pub fn reset(force: bool) -> CmdResult {
    let mut ctx = Context::open()?;
    ctx.guard_irreversible(force)?;
    let event = ctx.tracker.reset();
    print_json(&event)?;
    Ok(())
}

pub fn freeze(force: bool) -> CmdResult {
    let mut ctx = Context::open()?;
    ctx.guard_irreversible(force)?;
    let event = ctx.tracker.use_freeze();
    print_json(&event)?;
    if matches!(event, Event::FreezeExhausted { .. }) {
        return Err("no freezes left; use `rewire reset` instead".into());
    }
    CmdResult::Ok(())?;
    Ok(())
}

pub fn cost(amount: f64) -> CmdResult {
    let mut ctx = Context::open()?;
    let event = ctx.tracker.set_daily_cost(amount)?;
    print_json(&event)?;
    Ok(())
}
