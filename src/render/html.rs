use super::chart::RenderedChart;
use crate::analysis::hour_label;
use crate::config::ensure_directory;
use crate::error::Result;
use crate::model::{AuthorStats, Bucket, ChangeTotals, FrequencySummary, StatsReport};
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct ReportView<'a> {
    title: String,
    repository: &'a str,
    version: &'static str,
    total_commits: u64,
    first_commit: Option<String>,
    last_commit: Option<String>,
    totals: &'a ChangeTotals,
    authors: &'a [AuthorStats],
    frequency: Option<FrequencyView<'a>>,
    charts: Vec<ChartView<'a>>,
}

#[derive(Serialize)]
struct FrequencyView<'a> {
    summary: &'a FrequencySummary,
    peak_hour: String,
    tables: Vec<TableView<'a>>,
}

#[derive(Serialize)]
struct TableView<'a> {
    title: &'static str,
    key_header: &'static str,
    rows: &'a [Bucket],
}

#[derive(Serialize)]
struct ChartView<'a> {
    title: &'a str,
    svg: &'a str,
}

pub struct HtmlReporter {
    engine: Handlebars<'static>,
}

impl HtmlReporter {
    pub fn new() -> Result<Self> {
        let mut engine = Handlebars::new();
        engine.register_template_string("report", include_str!("../../templates/report.html.hbs"))?;
        Ok(Self { engine })
    }

    pub fn render(
        &self,
        stats: &StatsReport,
        repository: &str,
        date_format: &str,
        charts: &[RenderedChart],
    ) -> Result<String> {
        let name = Path::new(repository)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| repository.to_string());

        let frequency = stats.frequency.as_ref().map(|freq| FrequencyView {
            summary: &freq.summary,
            peak_hour: hour_label(freq.summary.peak_hour),
            tables: vec![
                TableView {
                    title: "Hourly distribution",
                    key_header: "Hour",
                    rows: &freq.hourly,
                },
                TableView {
                    title: "Weekday distribution",
                    key_header: "Weekday",
                    rows: &freq.weekday,
                },
                TableView {
                    title: "Weekly commits",
                    key_header: "Week",
                    rows: &freq.weekly,
                },
                TableView {
                    title: "Monthly commits",
                    key_header: "Month",
                    rows: &freq.monthly,
                },
            ],
        });

        let view = ReportView {
            title: format!("Git Commit Analysis: {name}"),
            repository,
            version: env!("CARGO_PKG_VERSION"),
            total_commits: stats.total_commits,
            first_commit: stats
                .date_range
                .as_ref()
                .map(|r| r.first_commit.format(date_format).to_string()),
            last_commit: stats
                .date_range
                .as_ref()
                .map(|r| r.last_commit.format(date_format).to_string()),
            totals: &stats.totals,
            authors: &stats.authors,
            frequency,
            charts: charts
                .iter()
                .map(|c| ChartView {
                    title: c.title,
                    svg: &c.svg,
                })
                .collect(),
        };

        Ok(self.engine.render("report", &view)?)
    }

    pub fn write_report(
        &self,
        path: &Path,
        stats: &StatsReport,
        repository: &str,
        date_format: &str,
        charts: &[RenderedChart],
    ) -> Result<()> {
        let html = self.render(stats, repository, date_format, charts)?;
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }
        fs::write(path, html)?;
        info!(event = "render.html.written", path = %path.display());
        Ok(())
    }
}
