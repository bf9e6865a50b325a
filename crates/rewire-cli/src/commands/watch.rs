use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use rewire_core::{DisplayTimer, TimerSlot};

use super::context::Context;
use super::CmdResult;

pub fn run(seconds: Option<u64>) -> CmdResult {
    let ctx = Context::open()?;
    let Some(start) = ctx.tracker.record().start_timestamp() else {
        println!("No active streak. Run `rewire start` first.");
        return Ok(());
    };
    let unit = ctx.tracker.config().unit_label.clone();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let mut slot = TimerSlot::new();
        slot.mount(DisplayTimer::spawn(Some(start), Utc::now, move |live| {
            let mut out = std::io::stdout();
            let _ = write!(out, "\r{} {}  {}", live.days, unit, live.clock());
            let _ = out.flush();
        }));

        let waited = match seconds {
            Some(secs) => {
                tokio::time::sleep(Duration::from_secs(secs)).await;
                Ok(())
            }
            None => tokio::signal::ctrl_c().await,
        };
        slot.unmount();
        println!();
        waited
    })?;
    Ok(())
}
