use crate::model::{Bucket, CommitRecord, FrequencyAnalysis, FrequencySummary};
use crate::util::{day_key, month_key, week_key};
use chrono::{Datelike, Timelike, Weekday};
use std::collections::BTreeMap;

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// Tally commits into time buckets. Hours and weekdays come from each
/// commit's own offset. Returns `None` when there is nothing to tally.
pub fn analyze_frequency(commits: &[CommitRecord]) -> Option<FrequencyAnalysis> {
    if commits.is_empty() {
        return None;
    }

    let mut hourly = [0u64; 24];
    let mut weekday = [0u64; 7];
    let mut daily: BTreeMap<String, u64> = BTreeMap::new();
    let mut weekly: BTreeMap<String, u64> = BTreeMap::new();
    let mut monthly: BTreeMap<String, u64> = BTreeMap::new();

    for commit in commits {
        let ts = &commit.timestamp;
        hourly[ts.hour() as usize] += 1;
        weekday[ts.weekday().num_days_from_monday() as usize] += 1;
        *daily.entry(day_key(ts)).or_insert(0) += 1;
        *weekly.entry(week_key(ts)).or_insert(0) += 1;
        *monthly.entry(month_key(ts)).or_insert(0) += 1;
    }

    let peak_hour = peak_index(&hourly) as u32;
    let peak_weekday = weekday_name(WEEKDAYS[peak_index(&weekday)]).to_string();

    let daily: Vec<Bucket> = daily.into_iter().map(|(k, v)| Bucket::new(k, v)).collect();
    let day_counts: Vec<u64> = daily.iter().map(|b| b.count).collect();
    let busiest_day = daily[peak_index(&day_counts)].clone();

    let active_days = daily.len() as u64;
    let average_per_active_day =
        (commits.len() as f64 / active_days as f64 * 100.0).round() / 100.0;

    Some(FrequencyAnalysis {
        hourly: hourly
            .iter()
            .enumerate()
            .map(|(hour, &count)| Bucket::new(format!("{hour:02}"), count))
            .collect(),
        weekday: WEEKDAYS
            .iter()
            .zip(weekday.iter())
            .map(|(&day, &count)| Bucket::new(weekday_name(day), count))
            .collect(),
        daily,
        weekly: weekly.into_iter().map(|(k, v)| Bucket::new(k, v)).collect(),
        monthly: monthly.into_iter().map(|(k, v)| Bucket::new(k, v)).collect(),
        summary: FrequencySummary {
            peak_hour,
            peak_weekday,
            active_days,
            average_per_active_day,
            busiest_day,
        },
    })
}

/// Index of the largest count; ties go to the earliest index.
fn peak_index(counts: &[u64]) -> usize {
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    best
}

/// Buckets ordered by count descending, keeping bucket order among equals.
pub fn ranked(buckets: &[Bucket]) -> Vec<&Bucket> {
    let mut ranked: Vec<&Bucket> = buckets.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}
