//! Configuration loading.
//!
//! Settings come from, in increasing priority:
//! 1. built-in defaults
//! 2. a JSON config file (`gitstat.json` in the current directory, or `--config`)
//! 3. command-line flags
//!
//! Every field has a default, so a partial file only overrides what it names.

use crate::cli::CommonArgs;
use crate::error::{GitstatError, Result};
use crate::render::OutputFormat;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "gitstat.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub analysis: AnalysisConfig,
    pub visualization: VisualizationConfig,
    pub filtering: FilteringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: OutputFormat,
    pub plots_directory: PathBuf,
    pub reports_directory: PathBuf,
    pub csv_directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            plots_directory: PathBuf::from("plots"),
            reports_directory: PathBuf::from("reports"),
            csv_directory: PathBuf::from("csv_exports"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub include_merges: bool,
    pub max_commits: Option<usize>,
    pub date_format: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            include_merges: true,
            max_commits: None,
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            chart_width: 960,
            chart_height: 420,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilteringConfig {
    pub exclude_authors: Vec<String>,
    pub include_only_authors: Vec<String>,
    pub since_date: Option<String>,
    pub until_date: Option<String>,
}

impl Config {
    /// Path the config is read from: the explicit one, else `gitstat.json`
    /// in the current directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load the config file. A missing file yields defaults; a malformed one
    /// is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(event = "config.load.not_found", path = %path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            GitstatError::Config(format!(
                "Failed to parse config file '{}': {e}",
                path.display()
            ))
        })?;
        info!(event = "config.load.completed", path = %path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON. Refuses to replace an existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(GitstatError::Config(format!(
                "Refusing to overwrite existing config file '{}'",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)? + "\n")?;
        info!(event = "config.save.completed", path = %path.display());
        Ok(())
    }

    /// Command-line flags take precedence over the file.
    pub fn apply_overrides(&mut self, common: &CommonArgs) {
        if common.since.is_some() {
            self.filtering.since_date = common.since.clone();
        }
        if common.until.is_some() {
            self.filtering.until_date = common.until.clone();
        }
        if common.no_merges {
            self.analysis.include_merges = false;
        }
        if common.max_commits.is_some() {
            self.analysis.max_commits = common.max_commits;
        }
        if !common.author.is_empty() {
            self.filtering.include_only_authors = common.author.clone();
        }
        if !common.exclude_author.is_empty() {
            self.filtering.exclude_authors = common.exclude_author.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.date_format.trim().is_empty()
            || StrftimeItems::new(&self.analysis.date_format).any(|item| item == Item::Error)
        {
            return Err(GitstatError::Config(format!(
                "Invalid date_format '{}'",
                self.analysis.date_format
            )));
        }
        if self.analysis.max_commits == Some(0) {
            return Err(GitstatError::Config(
                "max_commits must be greater than zero".to_string(),
            ));
        }
        let viz = &self.visualization;
        if viz.chart_width < 200 || viz.chart_height < 150 {
            return Err(GitstatError::Config(format!(
                "Chart size {}x{} is too small (minimum 200x150)",
                viz.chart_width, viz.chart_height
            )));
        }
        Ok(())
    }
}

/// Create an output directory and its parents if missing.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)?;
    Ok(())
}

/// `gitstat config`: print the effective configuration, or write it out.
pub fn exec(common: CommonArgs, write: bool) -> anyhow::Result<()> {
    use anyhow::Context;

    let path = Config::resolve_path(common.config.as_deref());
    let mut config = Config::load(&path).context("Failed to load configuration")?;
    config.apply_overrides(&common);
    config.validate()?;

    if write {
        config
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Configuration written to {}", path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_merges_per_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gitstat.json");
        fs::write(
            &path,
            r#"{ "analysis": { "include_merges": false }, "output": { "default_format": "json" } }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.analysis.include_merges);
        assert_eq!(config.analysis.date_format, "%Y-%m-%d %H:%M:%S");
        assert_eq!(config.output.default_format, OutputFormat::Json);
        assert_eq!(config.output.csv_directory, PathBuf::from("csv_exports"));
        assert_eq!(config.visualization, VisualizationConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gitstat.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(GitstatError::Config(_))));
    }

    #[test]
    fn save_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("gitstat.json");
        Config::default().save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
        assert!(Config::default().save(&path).is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = Config::default();
        config.analysis.date_format = "%Y-%m-%".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.visualization.chart_width = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analysis.max_commits = Some(0);
        assert!(config.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }
}
