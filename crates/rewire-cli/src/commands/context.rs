use std::rc::Rc;

use rewire_core::storage::{KvStore, Settings, SqliteStore, UiFlags};
use rewire_core::{AppConfig, Debouncer, RechargePolicy, SystemClock, Tracker};

use super::CmdResult;

/// Everything a command needs: settings, the device store, UI flags and
/// the tracker for the selected variant.
pub struct Context {
    pub settings: Settings,
    pub flags: UiFlags,
    pub tracker: Tracker,
}

impl Context {
    /// Open the device store and the variant chosen in settings, then apply
    /// any freeze recharge that became due since the last run.
    pub fn open() -> rewire_core::error::Result<Self> {
        let settings = Settings::load_or_default();
        let config = AppConfig::from_settings(&settings)?;
        let store: Rc<dyn KvStore> = Rc::new(SqliteStore::open()?);
        let flags = UiFlags::new(store.clone(), config.id.clone());

        let mut tracker = Tracker::open(config, store, Box::new(SystemClock))
            .with_policy(settings.milestones.policy)
            .with_recharge(RechargePolicy::from(&settings.freeze));
        if tracker.recharge_freezes().is_some() {
            tracing::info!(
                "freeze recharged ({} available)",
                tracker.record().freezes_available()
            );
        }

        Ok(Self {
            settings,
            flags,
            tracker,
        })
    }

    /// Admit an irreversible action unless one was accepted within the
    /// configured gap. `force` bypasses the check but still records the time.
    pub fn guard_irreversible(&self, force: bool) -> CmdResult {
        let now = self.tracker.now();
        let mut debouncer =
            Debouncer::new(self.settings.debounce_ms).with_last(self.flags.last_action());
        if !debouncer.try_acquire(now) && !force {
            return Err(format!(
                "ignored: repeated within {} ms (use --force to override)",
                self.settings.debounce_ms
            )
            .into());
        }
        self.flags.set_last_action(now);
        Ok(())
    }
}
