use super::frequency::analyze_frequency;
use crate::model::{AuthorStats, ChangeTotals, CommitDateRange, CommitRecord, StatsReport};
use crate::util::percentage;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

struct AuthorAccum<'a> {
    email: &'a str,
    latest: DateTime<FixedOffset>,
    commits: u64,
    insertions: u64,
    deletions: u64,
}

/// Summarise a commit list in one pass. Frequency tables are only built
/// when `with_frequency` is set.
pub fn aggregate(commits: &[CommitRecord], with_frequency: bool) -> StatsReport {
    if commits.is_empty() {
        return StatsReport::empty();
    }

    let mut authors: HashMap<&str, AuthorAccum> = HashMap::new();
    let mut totals = ChangeTotals::default();
    let mut first = commits[0].timestamp;
    let mut last = commits[0].timestamp;

    for commit in commits {
        first = first.min(commit.timestamp);
        last = last.max(commit.timestamp);

        totals.files_changed += commit.files_changed as u64;
        totals.insertions += commit.insertions;
        totals.deletions += commit.deletions;
        if commit.is_merge() {
            totals.merges += 1;
        }

        let entry = authors
            .entry(commit.author_name.as_str())
            .or_insert_with(|| AuthorAccum {
                email: commit.author_email.as_str(),
                latest: commit.timestamp,
                commits: 0,
                insertions: 0,
                deletions: 0,
            });
        entry.commits += 1;
        entry.insertions += commit.insertions;
        entry.deletions += commit.deletions;
        if commit.timestamp > entry.latest {
            entry.latest = commit.timestamp;
            entry.email = commit.author_email.as_str();
        }
    }

    let total_commits = commits.len() as u64;
    let mut authors: Vec<AuthorStats> = authors
        .into_iter()
        .map(|(name, acc)| AuthorStats {
            name: name.to_string(),
            email: acc.email.to_string(),
            commits: acc.commits,
            percentage: percentage(acc.commits, total_commits),
            insertions: acc.insertions,
            deletions: acc.deletions,
        })
        .collect();
    authors.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.name.cmp(&b.name)));

    StatsReport {
        total_commits,
        authors,
        date_range: Some(CommitDateRange {
            first_commit: first,
            last_commit: last,
        }),
        totals,
        frequency: if with_frequency {
            analyze_frequency(commits)
        } else {
            None
        },
    }
}
