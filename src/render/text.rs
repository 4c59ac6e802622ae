use crate::analysis::{hour_label, ranked};
use crate::model::{FrequencyAnalysis, StatsReport};
use console::style;
use std::fmt::{self, Write};

const BAR_WIDTH: u64 = 40;

/// Human-readable summary, styled for a terminal when colours are enabled.
pub fn render(stats: &StatsReport, repository: &str, date_format: &str) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_summary(&mut out, stats, repository, date_format);
    out
}

fn write_summary(
    out: &mut String,
    stats: &StatsReport,
    repository: &str,
    date_format: &str,
) -> fmt::Result {
    writeln!(out, "{}", style("=== Git Commit Analysis ===").bold())?;
    writeln!(out, "Repository: {repository}")?;
    writeln!(out, "Total commits: {}", style(stats.total_commits).cyan())?;

    if stats.total_commits == 0 {
        return Ok(());
    }

    if let Some(range) = &stats.date_range {
        writeln!(out, "\nDate range:")?;
        writeln!(
            out,
            "  First commit: {}",
            style(range.first_commit.format(date_format)).dim()
        )?;
        writeln!(
            out,
            "  Last commit: {}",
            style(range.last_commit.format(date_format)).dim()
        )?;
    }

    let totals = &stats.totals;
    writeln!(
        out,
        "\nChanges: {} files, {} / {} lines, {} merges",
        totals.files_changed,
        style(format!("+{}", totals.insertions)).green(),
        style(format!("-{}", totals.deletions)).red(),
        totals.merges
    )?;

    writeln!(out, "\nAuthors:")?;
    for author in &stats.authors {
        writeln!(
            out,
            "  {}: {} commits ({:.2}%)",
            author.name,
            style(author.commits).yellow(),
            author.percentage
        )?;
    }

    match &stats.frequency {
        Some(freq) => write_frequency(out, freq),
        None => Ok(()),
    }
}

fn write_frequency(out: &mut String, freq: &FrequencyAnalysis) -> fmt::Result {
    writeln!(out, "\n{}", style("=== Frequency Analysis ===").bold())?;

    writeln!(out, "\nMost active hours (24h format):")?;
    for bucket in ranked(&freq.hourly).into_iter().filter(|b| b.count > 0).take(5) {
        let hour: u32 = bucket.key.parse().unwrap_or(0);
        writeln!(out, "  {} - {} commits", hour_label(hour), bucket.count)?;
    }

    writeln!(out, "\nMost active weekdays:")?;
    for bucket in ranked(&freq.weekday).into_iter().filter(|b| b.count > 0) {
        writeln!(out, "  {}: {} commits", bucket.key, bucket.count)?;
    }

    let max = freq.hourly.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    writeln!(out, "\nHourly activity:")?;
    for bucket in &freq.hourly {
        let width = (bucket.count * BAR_WIDTH).div_ceil(max) as usize;
        writeln!(
            out,
            "  {} {:<40} {:>4}",
            bucket.key,
            style("█".repeat(width)).green(),
            bucket.count
        )?;
    }

    let summary = &freq.summary;
    writeln!(out, "\nPeak hour: {}", hour_label(summary.peak_hour))?;
    writeln!(out, "Peak weekday: {}", summary.peak_weekday)?;
    writeln!(
        out,
        "Busiest day: {} ({} commits)",
        summary.busiest_day.key, summary.busiest_day.count
    )?;
    writeln!(
        out,
        "Active days: {} (avg {:.2} commits/day)",
        summary.active_days, summary.average_per_active_day
    )
}
