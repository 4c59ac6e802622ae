use crate::analysis::{hour_label, weekday_name};
use crate::config::ensure_directory;
use crate::error::Result;
use crate::model::{CommitRecord, FrequencyAnalysis, StatsReport};
use crate::util::single_line;
use chrono::{Datelike, Timelike};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const COMMITS_FILE: &str = "commits.csv";
pub const AUTHORS_FILE: &str = "authors.csv";
pub const FREQUENCY_FILE: &str = "frequency.csv";
pub const TIMELINE_FILE: &str = "timeline.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub path: PathBuf,
    pub rows: usize,
    pub unit: &'static str,
}

#[derive(Serialize)]
struct CommitRow<'a> {
    hash: &'a str,
    author: &'a str,
    author_email: &'a str,
    date: String,
    message: String,
    files_changed: u32,
    insertions: u64,
    deletions: u64,
    weekday: &'static str,
    hour: u32,
}

#[derive(Serialize)]
struct AuthorRow<'a> {
    author: &'a str,
    commit_count: u64,
    percentage: f64,
}

#[derive(Serialize)]
struct FrequencyRow {
    r#type: &'static str,
    category: String,
    count: u64,
}

#[derive(Serialize)]
struct TimelineRow<'a> {
    date: &'a str,
    commits: u64,
}

fn writer<W: Write>(out: W, header: &[&str]) -> Result<::csv::Writer<W>> {
    let mut writer = ::csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(header)?;
    Ok(writer)
}

/// One row per commit, in the order given.
pub fn write_commits<W: Write>(out: W, commits: &[CommitRecord]) -> Result<usize> {
    let mut w = writer(
        out,
        &[
            "hash",
            "author",
            "author_email",
            "date",
            "message",
            "files_changed",
            "insertions",
            "deletions",
            "weekday",
            "hour",
        ],
    )?;
    for commit in commits {
        w.serialize(CommitRow {
            hash: &commit.short_id,
            author: &commit.author_name,
            author_email: &commit.author_email,
            date: commit.timestamp.to_rfc3339(),
            message: single_line(&commit.message),
            files_changed: commit.files_changed,
            insertions: commit.insertions,
            deletions: commit.deletions,
            weekday: weekday_name(commit.timestamp.weekday()),
            hour: commit.timestamp.hour(),
        })?;
    }
    w.flush()?;
    Ok(commits.len())
}

pub fn write_authors<W: Write>(out: W, stats: &StatsReport) -> Result<usize> {
    let mut w = writer(out, &["author", "commit_count", "percentage"])?;
    for author in &stats.authors {
        w.serialize(AuthorRow {
            author: &author.name,
            commit_count: author.commits,
            percentage: author.percentage,
        })?;
    }
    w.flush()?;
    Ok(stats.authors.len())
}

/// Hourly, weekday and monthly buckets as `type,category,count` rows.
pub fn write_frequency<W: Write>(out: W, freq: Option<&FrequencyAnalysis>) -> Result<usize> {
    let mut w = writer(out, &["type", "category", "count"])?;
    let mut rows = 0;
    if let Some(freq) = freq {
        for (hour, bucket) in freq.hourly.iter().enumerate() {
            w.serialize(FrequencyRow {
                r#type: "hourly",
                category: hour_label(hour as u32),
                count: bucket.count,
            })?;
            rows += 1;
        }
        for bucket in &freq.weekday {
            w.serialize(FrequencyRow {
                r#type: "weekday",
                category: bucket.key.clone(),
                count: bucket.count,
            })?;
            rows += 1;
        }
        for bucket in &freq.monthly {
            w.serialize(FrequencyRow {
                r#type: "monthly",
                category: bucket.key.clone(),
                count: bucket.count,
            })?;
            rows += 1;
        }
    }
    w.flush()?;
    Ok(rows)
}

/// Daily commit counts, oldest day first.
pub fn write_timeline<W: Write>(out: W, freq: Option<&FrequencyAnalysis>) -> Result<usize> {
    let mut w = writer(out, &["date", "commits"])?;
    let days = freq.map(|f| f.daily.as_slice()).unwrap_or_default();
    for bucket in days {
        w.serialize(TimelineRow {
            date: &bucket.key,
            commits: bucket.count,
        })?;
    }
    w.flush()?;
    Ok(days.len())
}

/// Write all four CSV files into `dir`, replacing earlier exports.
pub fn write_bundle(dir: &Path, commits: &[CommitRecord], stats: &StatsReport) -> Result<Vec<CsvExport>> {
    ensure_directory(dir)?;
    let freq = stats.frequency.as_ref();

    let mut exports = Vec::with_capacity(4);

    let path = dir.join(COMMITS_FILE);
    let rows = write_commits(File::create(&path)?, commits)?;
    exports.push(CsvExport { path, rows, unit: "commits" });

    let path = dir.join(AUTHORS_FILE);
    let rows = write_authors(File::create(&path)?, stats)?;
    exports.push(CsvExport { path, rows, unit: "authors" });

    let path = dir.join(FREQUENCY_FILE);
    let rows = write_frequency(File::create(&path)?, freq)?;
    exports.push(CsvExport { path, rows, unit: "records" });

    let path = dir.join(TIMELINE_FILE);
    let rows = write_timeline(File::create(&path)?, freq)?;
    exports.push(CsvExport { path, rows, unit: "days" });

    info!(event = "render.csv.bundle_written", dir = %dir.display(), files = exports.len());
    Ok(exports)
}
