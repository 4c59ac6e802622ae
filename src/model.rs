use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// A single commit as read from history, with its change counts against the
/// first parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub short_id: String,
    pub author_name: String,
    pub author_email: String,
    /// Committer time in the committer's own offset.
    pub timestamp: DateTime<FixedOffset>,
    pub summary: String,
    pub message: String,
    pub parent_count: usize,
    pub files_changed: u32,
    pub insertions: u64,
    pub deletions: u64,
}

impl CommitRecord {
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub name: String,
    pub email: String,
    pub commits: u64,
    pub percentage: f64,
    pub insertions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDateRange {
    pub first_commit: DateTime<FixedOffset>,
    pub last_commit: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeTotals {
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub merges: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub count: u64,
}

impl Bucket {
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self { key: key.into(), count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySummary {
    pub peak_hour: u32,
    pub peak_weekday: String,
    pub active_days: u64,
    pub average_per_active_day: f64,
    pub busiest_day: Bucket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyAnalysis {
    pub hourly: Vec<Bucket>,
    pub weekday: Vec<Bucket>,
    pub daily: Vec<Bucket>,
    pub weekly: Vec<Bucket>,
    pub monthly: Vec<Bucket>,
    pub summary: FrequencySummary,
}

/// Aggregate statistics consumed by every output formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub total_commits: u64,
    pub authors: Vec<AuthorStats>,
    pub date_range: Option<CommitDateRange>,
    pub totals: ChangeTotals,
    pub frequency: Option<FrequencyAnalysis>,
}

impl StatsReport {
    pub fn empty() -> Self {
        Self {
            total_commits: 0,
            authors: Vec::new(),
            date_range: None,
            totals: ChangeTotals::default(),
            frequency: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub since: Option<String>,
    pub until: Option<String>,
    pub include_merges: bool,
    pub max_commits: Option<usize>,
    pub include_authors: Vec<String>,
    pub exclude_authors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub repository_path: String,
    pub filters: FilterSummary,
    pub stats: StatsReport,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains<Tz: chrono::TimeZone>(&self, timestamp: &DateTime<Tz>) -> bool {
        if let Some(since) = self.since {
            if *timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if *timestamp > until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

/// Which commits the source adapter hands to the aggregator.
#[derive(Debug, Clone)]
pub struct CommitFilter {
    pub range: DateRange,
    pub include_merges: bool,
    pub max_commits: Option<usize>,
    pub include_authors: Vec<String>,
    pub exclude_authors: Vec<String>,
}

impl CommitFilter {
    pub fn accepts_author(&self, name: &str, email: &str) -> bool {
        if !self.include_authors.is_empty()
            && !self
                .include_authors
                .iter()
                .any(|pattern| crate::util::author_matches(pattern, name, email))
        {
            return false;
        }
        !self
            .exclude_authors
            .iter()
            .any(|pattern| crate::util::author_matches(pattern, name, email))
    }
}

impl Default for CommitFilter {
    fn default() -> Self {
        Self {
            range: DateRange::new(),
            include_merges: true,
            max_commits: None,
            include_authors: Vec::new(),
            exclude_authors: Vec::new(),
        }
    }
}
