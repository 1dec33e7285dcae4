//! Display helpers for list rows.

use chrono::{DateTime, Utc};

/// Upper-case the first character and leave the rest untouched.
pub fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First seven characters of a commit hash.
pub fn short_sha(hash: &str) -> String {
    hash.chars().take(7).collect()
}

// Divisors stepping seconds → minutes → hours → days → weeks → months → years.
const UNIT_STEPS: [f64; 6] = [60.0, 60.0, 24.0, 7.0, 365.0 / 7.0 / 12.0, 12.0];

const PAST: [&str; 14] = [
    "just now",
    "%s seconds ago",
    "1 minute ago",
    "%s minutes ago",
    "1 hour ago",
    "%s hours ago",
    "1 day ago",
    "%s days ago",
    "1 week ago",
    "%s weeks ago",
    "1 month ago",
    "%s months ago",
    "1 year ago",
    "%s years ago",
];

const FUTURE: [&str; 14] = [
    "right now",
    "in %s seconds",
    "in 1 minute",
    "in %s minutes",
    "in 1 hour",
    "in %s hours",
    "in 1 day",
    "in %s days",
    "in 1 week",
    "in %s weeks",
    "in 1 month",
    "in %s months",
    "in 1 year",
    "in %s years",
];

/// Relative description of `then` as seen from `now`, e.g. `3 hours ago` or `in 2 days`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_milliseconds() as f64 / 1000.0;
    let labels = if seconds < 0.0 { &FUTURE } else { &PAST };

    let mut amount = seconds.abs();
    let mut unit = 0;
    while unit < UNIT_STEPS.len() && amount >= UNIT_STEPS[unit] {
        amount /= UNIT_STEPS[unit];
        unit += 1;
    }
    let amount = amount.floor() as u64;

    // Even slots are the singular forms; below ten seconds counts as "just now".
    let plural_above = if unit == 0 { 9 } else { 1 };
    let mut slot = unit * 2;
    if amount > plural_above {
        slot += 1;
    }
    labels[slot].replace("%s", &amount.to_string())
}
