use chrono::DateTime;
use gitstat::analysis::{aggregate, analyze_frequency};
use gitstat::model::{CommitRecord, StatsReport};
use pretty_assertions::assert_eq;

fn commit(id: &str, author: &str, email: &str, when: &str) -> CommitRecord {
    CommitRecord {
        id: format!("{id:0<40}"),
        short_id: id.to_string(),
        author_name: author.to_string(),
        author_email: email.to_string(),
        timestamp: DateTime::parse_from_rfc3339(when).unwrap(),
        summary: format!("commit {id}"),
        message: format!("commit {id}\n"),
        parent_count: 1,
        files_changed: 1,
        insertions: 3,
        deletions: 1,
    }
}

fn history() -> Vec<CommitRecord> {
    vec![
        commit("a1", "Alice", "alice@old.example", "2024-01-01T23:30:00-05:00"),
        commit("b1", "Bob", "bob@example.com", "2024-01-02T10:00:00+00:00"),
        commit("a2", "Alice", "alice@new.example", "2024-01-03T09:00:00+09:00"),
        commit("c1", "Carol", "carol@example.com", "2024-01-03T09:30:00+00:00"),
        commit("b2", "Bob", "bob@example.com", "2024-02-10T10:15:00+00:00"),
    ]
}

#[test]
fn empty_input_yields_empty_report() {
    assert_eq!(aggregate(&[], true), StatsReport::empty());
    assert!(analyze_frequency(&[]).is_none());
}

#[test]
fn author_counts_sum_to_total() {
    let stats = aggregate(&history(), false);
    assert_eq!(stats.total_commits, 5);
    assert_eq!(stats.authors.iter().map(|a| a.commits).sum::<u64>(), 5);

    let names: Vec<&str> = stats.authors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    assert_eq!(stats.authors[0].percentage, 40.0);
    assert_eq!(stats.authors[2].percentage, 20.0);
    assert!(stats.frequency.is_none());
}

#[test]
fn author_email_comes_from_latest_commit() {
    let stats = aggregate(&history(), false);
    let alice = stats.authors.iter().find(|a| a.name == "Alice").unwrap();
    assert_eq!(alice.email, "alice@new.example");
    assert_eq!(alice.insertions, 6);
    assert_eq!(alice.deletions, 2);
}

#[test]
fn date_range_spans_min_and_max() {
    let stats = aggregate(&history(), false);
    let range = stats.date_range.unwrap();
    assert_eq!(range.first_commit.to_rfc3339(), "2024-01-01T23:30:00-05:00");
    assert_eq!(range.last_commit.to_rfc3339(), "2024-02-10T10:15:00+00:00");
    assert!(range.first_commit <= range.last_commit);
}

#[test]
fn totals_and_merges() {
    let mut commits = history();
    commits[1].parent_count = 2;
    let stats = aggregate(&commits, false);
    assert_eq!(stats.totals.files_changed, 5);
    assert_eq!(stats.totals.insertions, 15);
    assert_eq!(stats.totals.deletions, 5);
    assert_eq!(stats.totals.merges, 1);
}

#[test]
fn input_order_does_not_change_result() {
    let commits = history();
    let mut reversed = commits.clone();
    reversed.reverse();
    assert_eq!(aggregate(&commits, true), aggregate(&reversed, true));
}

#[test]
fn every_frequency_table_sums_to_total() {
    let stats = aggregate(&history(), true);
    let freq = stats.frequency.unwrap();
    for table in [&freq.hourly, &freq.weekday, &freq.daily, &freq.weekly, &freq.monthly] {
        assert_eq!(table.iter().map(|b| b.count).sum::<u64>(), stats.total_commits);
    }
    assert_eq!(freq.hourly.len(), 24);
    assert_eq!(freq.weekday.len(), 7);
}

#[test]
fn buckets_use_the_commit_local_time() {
    let freq = analyze_frequency(&history()).unwrap();

    // 23:30 on Monday in -05:00 stays a late Monday commit
    assert_eq!(freq.hourly[23].count, 1);
    assert_eq!(freq.hourly[9].count, 2);
    assert_eq!(freq.hourly[10].count, 2);
    assert_eq!(freq.weekday[0].key, "Monday");
    assert_eq!(freq.weekday[0].count, 1);

    let days: Vec<(&str, u64)> = freq.daily.iter().map(|b| (b.key.as_str(), b.count)).collect();
    assert_eq!(
        days,
        vec![("2024-01-01", 1), ("2024-01-02", 1), ("2024-01-03", 2), ("2024-02-10", 1)]
    );
    let months: Vec<&str> = freq.monthly.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);
    assert_eq!(freq.weekly[0].key, "2024-W01");
}

#[test]
fn summary_picks_earliest_peak() {
    let freq = analyze_frequency(&history()).unwrap();
    // 09 and 10 tie at two commits each
    assert_eq!(freq.summary.peak_hour, 9);
    assert_eq!(freq.summary.peak_weekday, "Wednesday");
    assert_eq!(freq.summary.busiest_day.key, "2024-01-03");
    assert_eq!(freq.summary.busiest_day.count, 2);
    assert_eq!(freq.summary.active_days, 4);
    assert_eq!(freq.summary.average_per_active_day, 1.25);
}
