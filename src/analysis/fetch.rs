use crate::cli::CommonArgs;
use crate::config::Config;
use crate::git::GitRepo;
use crate::model::{CommitFilter, CommitRecord, FilterSummary};
use anyhow::Context;
use tracing::info;

/// Everything a command needs after reading history once.
pub struct Session {
    pub repo: GitRepo,
    pub config: Config,
    pub commits: Vec<CommitRecord>,
}

impl Session {
    pub fn filter_summary(&self) -> FilterSummary {
        FilterSummary {
            since: self.config.filtering.since_date.clone(),
            until: self.config.filtering.until_date.clone(),
            include_merges: self.config.analysis.include_merges,
            max_commits: self.config.analysis.max_commits,
            include_authors: self.config.filtering.include_only_authors.clone(),
            exclude_authors: self.config.filtering.exclude_authors.clone(),
        }
    }

    pub fn repository_path(&self) -> String {
        self.repo.path().to_string_lossy().to_string()
    }
}

pub fn load_session(common: &CommonArgs) -> anyhow::Result<Session> {
    let config_path = Config::resolve_path(common.config.as_deref());
    let mut config = Config::load(&config_path).context("Failed to load configuration")?;
    config.apply_overrides(common);
    config.validate().context("Invalid configuration")?;

    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let range = repo
        .resolve_range(
            config.filtering.since_date.as_deref(),
            config.filtering.until_date.as_deref(),
        )
        .context("Failed to resolve date range")?;

    let filter = CommitFilter {
        range,
        include_merges: config.analysis.include_merges,
        max_commits: config.analysis.max_commits,
        include_authors: config.filtering.include_only_authors.clone(),
        exclude_authors: config.filtering.exclude_authors.clone(),
    };

    let commits = repo
        .commits(&filter, !common.quiet)
        .context("Failed to read commits from repository")?;

    info!(
        event = "analysis.session.loaded",
        repo = %repo.path().display(),
        commits = commits.len()
    );

    Ok(Session {
        repo,
        config,
        commits,
    })
}
