mod record;

pub use record::{
    days_between, is_valid_daily_cost, round_cents, FreezeOutcome, ResetOutcome, StreakRecord,
    INITIAL_FREEZES, MAX_DAILY_COST, MS_PER_DAY,
};
