//! Day-indexed copy selection.
//!
//! Every list is cycled modulo its length, so any day or week count picks a
//! valid entry. An empty list yields `None`.

use crate::config::AppConfig;

fn cycle(items: &[String], index: u32) -> Option<&str> {
    if items.is_empty() {
        return None;
    }
    let i = index as usize % items.len();
    Some(items[i].as_str())
}

/// Whole weeks in `current_days`.
pub fn current_week(current_days: u32) -> u32 {
    current_days / 7
}

pub fn quote_for_day(config: &AppConfig, current_days: u32) -> Option<&str> {
    cycle(&config.quotes, current_days)
}

pub fn weekly_message(config: &AppConfig, week: u32) -> Option<&str> {
    cycle(&config.weekly_messages, week)
}

pub fn journal_prompt(config: &AppConfig, current_days: u32) -> Option<&str> {
    cycle(&config.journal_prompts, current_days)
}

const CHECK_IN_MESSAGES: [&str; 7] = [
    "You're doing amazing. Keep it up.",
    "Another day stronger. You've got this.",
    "Small wins compound. This is one.",
    "Consistency beats perfection. Always.",
    "Your future self will thank you for today.",
    "One more day in the books. Proud of you.",
    "Still here, still fighting. That's everything.",
];

/// Encouragement shown with the daily check-in.
pub fn check_in_message(current_days: u32) -> &'static str {
    CHECK_IN_MESSAGES[current_days as usize % CHECK_IN_MESSAGES.len()]
}

/// A weekly recap is due on every full week, and daily from day 3 through
/// the end of the first week.
pub fn recap_due(current_days: u32) -> bool {
    current_days > 0 && (current_days % 7 == 0 || (3..7).contains(&current_days))
}

pub fn week_label(week: u32) -> String {
    match week {
        1 => "1 Week".into(),
        2 => "2 Weeks".into(),
        4 => "1 Month".into(),
        8 => "2 Months".into(),
        12 => "3 Months".into(),
        n => format!("Week {n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::variants;

    fn config_with(quotes: &[&str]) -> AppConfig {
        AppConfig {
            quotes: quotes.iter().map(|q| q.to_string()).collect(),
            ..variants::rewire()
        }
    }

    #[test]
    fn test_check_in_message_cycles_weekly() {
        assert_eq!(check_in_message(0), check_in_message(7));
        assert_ne!(check_in_message(1), check_in_message(2));
        assert_eq!(check_in_message(u32::MAX), check_in_message(u32::MAX % 7));
    }

    #[test]
    fn test_quotes_cycle() {
        let cfg = config_with(&["a", "b", "c"]);
        assert_eq!(quote_for_day(&cfg, 0), Some("a"));
        assert_eq!(quote_for_day(&cfg, 4), Some("b"));
        assert_eq!(quote_for_day(&cfg, u32::MAX), Some("a"));
    }

    #[test]
    fn test_empty_lists_yield_none() {
        let cfg = AppConfig {
            weekly_messages: vec![],
            journal_prompts: vec![],
            ..config_with(&[])
        };
        assert!(quote_for_day(&cfg, 10).is_none());
        assert!(weekly_message(&cfg, 2).is_none());
        assert!(journal_prompt(&cfg, 2).is_none());
    }

    #[test]
    fn test_builtin_copy_never_out_of_bounds() {
        for cfg in variants::all() {
            for day in [0, 1, 6, 7, 89, 90, 365, 10_000] {
                if !cfg.quotes.is_empty() {
                    assert!(quote_for_day(&cfg, day).is_some());
                }
                if !cfg.weekly_messages.is_empty() {
                    assert!(weekly_message(&cfg, current_week(day)).is_some());
                }
            }
        }
    }

    #[test]
    fn test_recap_schedule() {
        let due: Vec<u32> = (0..=21).filter(|d| recap_due(*d)).collect();
        assert_eq!(due, vec![3, 4, 5, 6, 7, 14, 21]);
    }

    #[test]
    fn test_week_labels() {
        assert_eq!(week_label(1), "1 Week");
        assert_eq!(week_label(4), "1 Month");
        assert_eq!(week_label(5), "Week 5");
    }
}
