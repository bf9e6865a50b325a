//! Compiled-in branded variants.

use super::{AppConfig, Milestone, Phase, TimelineEntry};

pub const DEFAULT_ID: &str = "rewire";

/// Every built-in variant, default first.
pub fn all() -> Vec<AppConfig> {
    vec![rewire(), vapefree(), sober(), sugarfree(), decaf()]
}

fn phase(max_day: u32, label: &str, color: &str) -> Phase {
    Phase {
        max_day,
        label: label.into(),
        color: color.into(),
    }
}

fn milestone(day: u32, label: &str, icon: &str, message: &str) -> Milestone {
    Milestone {
        day,
        label: label.into(),
        icon: icon.into(),
        message: message.into(),
    }
}

fn timeline(day: u32, title: &str, description: &str) -> TimelineEntry {
    TimelineEntry {
        day,
        title: title.into(),
        description: description.into(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Thresholds shared by every variant; only the copy differs.
fn standard_milestones(messages: [&str; 12]) -> Vec<Milestone> {
    const STEPS: [(u32, &str, &str); 12] = [
        (1, "Day 1", "\u{1F331}"),
        (3, "3 Days", "\u{1F525}"),
        (7, "1 Week", "\u{2B50}"),
        (14, "2 Weeks", "\u{1F31F}"),
        (21, "3 Weeks", "\u{1F4AA}"),
        (30, "1 Month", "\u{1F3C5}"),
        (45, "45 Days", "\u{1F680}"),
        (60, "2 Months", "\u{1F48E}"),
        (90, "90 Days", "\u{1F451}"),
        (120, "4 Months", "\u{1F30A}"),
        (180, "6 Months", "\u{1F985}"),
        (365, "1 Year", "\u{1F3C6}"),
    ];
    STEPS
        .iter()
        .zip(messages)
        .map(|(&(day, label, icon), message)| milestone(day, label, icon, message))
        .collect()
}

pub fn rewire() -> AppConfig {
    AppConfig {
        id: DEFAULT_ID.into(),
        name: "Rewire".into(),
        tagline: "Reboot your brain, one day at a time.".into(),
        unit_label: "days".into(),
        phases: vec![
            phase(7, "Withdrawal", "text-red-400"),
            phase(30, "Adjustment", "text-orange-400"),
            phase(60, "Rewiring", "text-yellow-400"),
            phase(90, "Rebalancing", "text-emerald-400"),
            phase(u32::MAX, "Rewired", "text-accent"),
        ],
        milestones: standard_milestones([
            "The first step is the hardest. You took it.",
            "Cravings peak around now. Ride the wave.",
            "One full week. Your dopamine baseline is shifting.",
            "Two weeks in. Focus is starting to come back.",
            "Three weeks. New habits are taking root.",
            "A full month. You are not the same person who started.",
            "Forty-five days. Momentum is on your side.",
            "Two months. The fog has lifted.",
            "Ninety days. Fully rewired.",
            "Four months of choosing yourself.",
            "Half a year. This is who you are now.",
            "One full year. Legendary.",
        ]),
        goal_days: 90,
        recovery_timeline: vec![
            timeline(1, "Decision made", "Your brain starts adapting the moment you stop."),
            timeline(7, "Sleep improves", "Restlessness fades and sleep begins to settle."),
            timeline(30, "Clearer focus", "Attention span and motivation noticeably return."),
            timeline(90, "Baseline reset", "Reward pathways have largely recalibrated."),
        ],
        default_daily_cost: None,
        cost_label: None,
        quotes: strings(&[
            "Discipline is choosing what you want most over what you want now.",
            "You don't have to see the whole staircase, just take the first step.",
            "Every day clean is a vote for the person you want to become.",
            "The urge will pass whether you act on it or not.",
            "Progress, not perfection.",
        ]),
        weekly_messages: strings(&[
            "Another week stronger. Keep stacking days.",
            "Your streak is proof you can do hard things.",
            "Look how far you've come. Keep going.",
        ]),
        journal_prompts: strings(&[
            "What helped you stay on track today?",
            "What triggered an urge, and how did you handle it?",
            "What are you grateful for right now?",
        ]),
    }
}

pub fn vapefree() -> AppConfig {
    AppConfig {
        id: "vapefree".into(),
        name: "VapeFree".into(),
        tagline: "Breathe easier every day.".into(),
        unit_label: "days".into(),
        phases: vec![
            phase(3, "Nicotine Exit", "text-red-400"),
            phase(14, "Cravings Fade", "text-orange-400"),
            phase(30, "Lungs Clearing", "text-yellow-400"),
            phase(u32::MAX, "Free", "text-accent"),
        ],
        milestones: standard_milestones([
            "Nicotine is already leaving your bloodstream.",
            "Nicotine-free. Withdrawal peaks now, hold on.",
            "One week. Taste and smell are sharpening.",
            "Two weeks. Circulation is improving.",
            "Three weeks. Cravings are shorter and rarer.",
            "One month. Lung function is climbing.",
            "Forty-five days. Breathing feels easier.",
            "Two months. Your energy is back.",
            "Ninety days. Coughing and shortness of breath have eased.",
            "Four months vape-free.",
            "Six months. Your lungs thank you.",
            "A full year without nicotine. Incredible.",
        ]),
        goal_days: 30,
        recovery_timeline: vec![
            timeline(1, "Heart rate drops", "Blood pressure and pulse start to normalize."),
            timeline(3, "Nicotine gone", "Your body is nicotine-free."),
            timeline(14, "Circulation up", "Walking and exercise get easier."),
        ],
        default_daily_cost: Some(5.0),
        cost_label: Some("spent on vaping".into()),
        quotes: strings(&[
            "Every craving you beat makes the next one weaker.",
            "Your lungs are healing right now.",
            "Freedom tastes better than any flavor.",
        ]),
        weekly_messages: strings(&[
            "Another smoke-free week. Your body is repairing itself.",
            "Cravings come in waves. You are learning to surf.",
        ]),
        journal_prompts: strings(&[
            "When did you want to vape today?",
            "What did you do instead?",
        ]),
    }
}

pub fn sober() -> AppConfig {
    AppConfig {
        id: "sober".into(),
        name: "Sober".into(),
        tagline: "One day at a time.".into(),
        unit_label: "days".into(),
        phases: vec![
            phase(7, "Detox", "text-red-400"),
            phase(30, "Early Recovery", "text-orange-400"),
            phase(90, "Stabilizing", "text-yellow-400"),
            phase(365, "Thriving", "text-emerald-400"),
            phase(u32::MAX, "Sober Life", "text-accent"),
        ],
        milestones: standard_milestones([
            "Twenty-four hours. That counts.",
            "Three days. The hardest stretch is behind you.",
            "One week sober.",
            "Two weeks. Sleep is getting deeper.",
            "Three weeks. Your liver is recovering.",
            "Thirty days sober.",
            "Forty-five days of clarity.",
            "Sixty days. Mood is steadier.",
            "Ninety days. A real foundation.",
            "Four months of showing up.",
            "Six months sober.",
            "One year. Celebrate you.",
        ]),
        goal_days: 365,
        recovery_timeline: vec![
            timeline(3, "Withdrawal eases", "Physical symptoms usually peak and start to fade."),
            timeline(30, "Liver repair", "Liver fat begins to decrease."),
            timeline(90, "Brain recovery", "Memory and decision-making measurably improve."),
        ],
        default_daily_cost: Some(12.0),
        cost_label: Some("spent on drinks".into()),
        quotes: strings(&[
            "Recovery is not a race.",
            "You are stronger than the craving.",
            "Sober is a superpower.",
        ]),
        weekly_messages: strings(&[
            "Another sober week. You earned it.",
            "Every week builds the life you want.",
        ]),
        journal_prompts: strings(&[
            "How are you feeling right now?",
            "Who supported you this week?",
        ]),
    }
}

pub fn sugarfree() -> AppConfig {
    AppConfig {
        id: "sugarfree".into(),
        name: "SugarFree".into(),
        tagline: "Break the sugar cycle.".into(),
        unit_label: "days".into(),
        phases: vec![
            phase(5, "Sugar Crash", "text-red-400"),
            phase(21, "Reset", "text-orange-400"),
            phase(u32::MAX, "Balanced", "text-accent"),
        ],
        milestones: standard_milestones([
            "Day one without added sugar.",
            "Three days. Cravings are loud, but temporary.",
            "A week. Energy dips are leveling out.",
            "Two weeks. Fruit starts tasting sweeter.",
            "Twenty-one days. The habit loop is broken.",
            "A month sugar-free.",
            "Forty-five days of steady energy.",
            "Two months. Your palate has reset.",
            "Ninety days sugar-free.",
            "Four months. This is easy now.",
            "Six months sugar-free.",
            "One sweet year. Well, not sweet.",
        ]),
        goal_days: 30,
        recovery_timeline: vec![
            timeline(3, "Blood sugar steadies", "Fewer spikes and crashes through the day."),
            timeline(21, "Taste reset", "Sweet foods taste noticeably sweeter."),
        ],
        default_daily_cost: Some(3.0),
        cost_label: Some("spent on sweets".into()),
        quotes: strings(&["Cravings are signals, not commands."]),
        weekly_messages: strings(&["Another week of real energy."]),
        journal_prompts: strings(&["What did you eat when a craving hit?"]),
    }
}

pub fn decaf() -> AppConfig {
    AppConfig {
        id: "decaf".into(),
        name: "Decaf".into(),
        tagline: "Natural energy, no crash.".into(),
        unit_label: "days".into(),
        phases: vec![
            phase(3, "Headaches", "text-red-400"),
            phase(10, "Fog Lifting", "text-orange-400"),
            phase(u32::MAX, "Naturally Awake", "text-accent"),
        ],
        milestones: standard_milestones([
            "First caffeine-free day.",
            "Three days. Withdrawal headaches peak here.",
            "A week. Sleep is getting deeper.",
            "Two weeks. Mornings feel normal.",
            "Three weeks. Energy without the jitters.",
            "One month caffeine-free.",
            "Forty-five days of calm focus.",
            "Two months. Anxiety is lower.",
            "Ninety days caffeine-free.",
            "Four months naturally awake.",
            "Six months without caffeine.",
            "A full year. Fully decaffeinated.",
        ]),
        goal_days: 14,
        recovery_timeline: vec![timeline(
            9,
            "Adenosine reset",
            "Your brain's sleep pressure signalling is back to normal.",
        )],
        default_daily_cost: Some(4.5),
        cost_label: Some("spent on coffee".into()),
        quotes: strings(&["Rest is productive."]),
        weekly_messages: strings(&["Another week of real, natural energy."]),
        journal_prompts: strings(&["How was your energy this afternoon?"]),
    }
}
