use crate::error::{GitstatError, Result};
use crate::model::{CommitFilter, CommitRecord, DateRange};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub struct GitRepo {
    pub(super) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        if !repo_path.exists() {
            return Err(GitstatError::PathNotFound(repo_path));
        }

        let repo = discover(&repo_path).map_err(|e| {
            debug!(
                event = "git.open.discover_failed",
                path = %repo_path.display(),
                error = %e
            );
            GitstatError::NotARepository {
                path: repo_path.clone(),
                source: Box::new(e),
            }
        })?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        info!(event = "git.open.completed", path = %path.display());
        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve_range(&self, since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
        let mut range = DateRange::new();

        let since_dt = since.map(|s| self.parse_commit_or_date(s)).transpose()?;
        let until_dt = until.map(|u| self.parse_commit_or_date(u)).transpose()?;

        if let (Some(s), Some(u)) = (since_dt, until_dt) {
            if s > u {
                return Err(GitstatError::InvalidDate(format!(
                    "Invalid range: since ({s}) is after until ({u})"
                )));
            }
        }

        if let Some(s) = since_dt {
            range = range.with_since(s);
        }
        if let Some(u) = until_dt {
            range = range.with_until(u);
        }

        Ok(range)
    }

    fn parse_commit_or_date(&self, input: &str) -> Result<DateTime<Utc>> {
        if let Some(dt) = parse_date(input)? {
            return Ok(dt);
        }

        // Fallback to Git ref
        let id = self
            .repo
            .rev_parse_single(input)
            .map_err(|e| GitstatError::Parse(format!("Invalid commit or date '{input}': {e}")))?;

        let commit = id
            .object()?
            .try_into_commit()
            .map_err(|_| GitstatError::Parse(format!("Not a commit: {input}")))?;

        let secs = commit.time()?.seconds;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| GitstatError::InvalidDate(format!("Invalid timestamp: {secs}")))
    }

    /// Walk history reachable from HEAD, newest commit first.
    ///
    /// Change counts are computed only for the commits that survive filtering
    /// and `max_commits`. In a shallow clone the boundary commits are treated
    /// as roots.
    pub fn commits(&self, filter: &CommitFilter, show_progress: bool) -> Result<Vec<CommitRecord>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            info!(event = "git.walk.unborn_head", path = %self.path.display());
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;
        let boundary = self.shallow_boundary()?;

        let mut pending: Vec<(CommitRecord, ObjectId, Option<ObjectId>)> = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);
        let mut skipped = 0usize;

        let pb = if show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} {pos}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message("Reading commits...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            // like git, treat a shallow boundary commit as parentless
            let parents: Vec<ObjectId> = if boundary.contains(&commit_id) {
                debug!(event = "git.walk.shallow_boundary", commit = %commit_id);
                Vec::new()
            } else {
                commit.parent_ids().map(|id| id.detach()).collect()
            };
            stack.extend(parents.iter().copied());

            let time = commit.time()?;
            let timestamp = commit_timestamp(time.seconds, time.offset)?;

            if !filter.range.contains(&timestamp)
                || (!filter.include_merges && parents.len() > 1)
            {
                skipped += 1;
                continue;
            }

            let author = commit.author()?;
            let author_name = author.name.to_string();
            let author_email = author.email.to_string();
            if !filter.accepts_author(&author_name, &author_email) {
                skipped += 1;
                continue;
            }

            let message = commit.message_raw()?.to_string();
            let summary = message.lines().next().unwrap_or("").trim().to_string();
            let id = commit_id.to_string();

            pending.push((
                CommitRecord {
                    short_id: id.chars().take(8).collect(),
                    id,
                    author_name,
                    author_email,
                    timestamp,
                    summary,
                    message: message.trim().to_string(),
                    parent_count: parents.len(),
                    files_changed: 0,
                    insertions: 0,
                    deletions: 0,
                },
                commit_id,
                parents.first().copied(),
            ));

            pb.inc(1);
        }

        pending.sort_by(|(a, ..), (b, ..)| {
            b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id))
        });
        if let Some(max) = filter.max_commits {
            pending.truncate(max);
        }

        pb.set_message("Counting changes...");
        let mut commits = Vec::with_capacity(pending.len());
        for (mut record, commit_id, diff_base) in pending {
            let counts = self.change_counts(commit_id, diff_base)?;
            record.files_changed = counts.files_changed;
            record.insertions = counts.insertions;
            record.deletions = counts.deletions;
            commits.push(record);
        }

        pb.finish_and_clear();

        info!(
            event = "git.walk.completed",
            visited = seen.len(),
            kept = commits.len(),
            skipped = skipped,
            shallow = !boundary.is_empty()
        );
        Ok(commits)
    }

    /// Commits whose parents are missing because the clone is shallow.
    fn shallow_boundary(&self) -> Result<HashSet<ObjectId>> {
        let commits = self
            .repo
            .shallow_commits()
            .map_err(|e| GitstatError::Parse(format!("Failed to read shallow file: {e}")))?;
        Ok(commits
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }
}

fn commit_timestamp(seconds: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    let tz = FixedOffset::east_opt(offset)
        .ok_or_else(|| GitstatError::InvalidDate(format!("Invalid UTC offset: {offset}")))?;
    let utc = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| GitstatError::InvalidDate(format!("Invalid timestamp: {seconds}")))?;
    Ok(utc.with_timezone(&tz))
}

/// Parse an absolute or relative date. `Ok(None)` means the input is not a
/// date and may name a revision instead.
fn parse_date(input: &str) -> Result<Option<DateTime<Utc>>> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    // YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(Utc.from_utc_datetime(&datetime)));
        }
    }

    // Relative duration (e.g. "3 days ago", "2weeks ago")
    if let Some(duration) = parse_natural_duration(input) {
        let target = chrono::Duration::from_std(duration)
            .ok()
            .and_then(|d| Utc::now().checked_sub_signed(d))
            .ok_or_else(|| GitstatError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(Some(target));
    }

    Ok(None)
}

pub fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();
    let amount = input.strip_suffix("ago")?.trim();

    // a month counts as 30 days
    if let Some(months) = amount
        .strip_suffix(" months")
        .or_else(|| amount.strip_suffix(" month"))
    {
        if let Ok(n) = months.trim().parse::<u64>() {
            return n.checked_mul(30 * 86400).map(Duration::from_secs);
        }
    }

    humantime::parse_duration(amount).ok()
}
