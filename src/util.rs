use chrono::{DateTime, Datelike, TimeZone};

pub fn week_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    let week = timestamp.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

pub fn month_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    format!("{}-{:02}", timestamp.year(), timestamp.month())
}

pub fn day_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    timestamp.date_naive().format("%Y-%m-%d").to_string()
}

/// Share of `part` in `total` as a percentage rounded to two decimals.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 10_000.0).round() / 100.0
}

/// Case-insensitive substring match against either the author name or email.
pub fn author_matches(pattern: &str, name: &str, email: &str) -> bool {
    let pattern = pattern.to_lowercase();
    name.to_lowercase().contains(&pattern) || email.to_lowercase().contains(&pattern)
}

/// Flatten a commit message onto one line for tabular output.
pub fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}
