//! Live elapsed-time display.
//!
//! [`LiveTime`] breaks the time since the streak start into
//! days/hours/minutes/seconds. [`DisplayTimer`] recomputes it once per second
//! on a tokio task; the task lives exactly as long as its handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveTime {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl LiveTime {
    /// Breakdown of `now - start`, clamped at zero. A never-started streak
    /// reads all zeros.
    pub fn between(start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(start) = start else {
            return Self::default();
        };
        let total_secs = (now - start).num_milliseconds().max(0) as u64 / 1000;
        Self {
            days: total_secs / 86_400,
            hours: ((total_secs % 86_400) / 3600) as u8,
            minutes: ((total_secs % 3600) / 60) as u8,
            seconds: (total_secs % 60) as u8,
        }
    }

    pub fn clock(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Handle to a once-per-second display task.
///
/// Dropping the handle or calling [`DisplayTimer::cancel`] aborts the task.
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct DisplayTimer {
    handle: Option<JoinHandle<()>>,
}

impl DisplayTimer {
    /// Start ticking. The first tick fires immediately.
    pub fn spawn<N, F>(start: Option<DateTime<Utc>>, now: N, mut on_tick: F) -> Self
    where
        N: Fn() -> DateTime<Utc> + Send + 'static,
        F: FnMut(LiveTime) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick(LiveTime::between(start, now()));
            }
        });
        tracing::debug!("display timer started");
        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("display timer cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DisplayTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Holds at most one [`DisplayTimer`] for a view.
#[derive(Debug, Default)]
pub struct TimerSlot {
    current: Option<DisplayTimer>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `timer`, cancelling any previous one first.
    pub fn mount(&mut self, timer: DisplayTimer) {
        self.unmount();
        self.current = Some(timer);
    }

    pub fn unmount(&mut self) {
        if let Some(mut timer) = self.current.take() {
            timer.cancel();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.current.as_ref().is_some_and(DisplayTimer::is_running)
    }
}
