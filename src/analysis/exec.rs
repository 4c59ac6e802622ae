use super::{aggregate, load_session, Session};
use crate::cli::CommonArgs;
use crate::model::StatsReport;
use crate::render::{self, write_charts, ChartRenderer, HtmlReporter, OutputFormat, RenderedChart};
use anyhow::Context;
use console::style;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn exec(
    common: CommonArgs,
    format: Option<OutputFormat>,
    frequency: bool,
    charts: bool,
    report: Option<PathBuf>,
) -> anyhow::Result<()> {
    let session = load_session(&common)?;
    let format = format.unwrap_or(session.config.output.default_format);

    let with_frequency = frequency || charts || format == OutputFormat::Csv;
    let stats = aggregate(&session.commits, with_frequency);

    let rendered_charts = if charts {
        render_charts(&session, &stats)?
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Text => {
            let text = render::text::render(
                &stats,
                &session.repository_path(),
                &session.config.analysis.date_format,
            );
            print!("{text}");
        }
        OutputFormat::Json => {
            let output = render::json::envelope(
                &session.repository_path(),
                session.filter_summary(),
                stats.clone(),
            );
            println!("{}", render::json::to_json(&output)?);
        }
        OutputFormat::Html => {
            let path = report.unwrap_or_else(|| {
                session.config.output.reports_directory.join("report.html")
            });
            HtmlReporter::new()?
                .write_report(
                    &path,
                    &stats,
                    &session.repository_path(),
                    &session.config.analysis.date_format,
                    &rendered_charts,
                )
                .context("Failed to write HTML report")?;
            println!("HTML report generated: {}", absolute(&path).display());
        }
        OutputFormat::Csv => {
            let exports = render::csv::write_bundle(
                &session.config.output.csv_directory,
                &session.commits,
                &stats,
            )
            .context("Failed to export CSV files")?;
            println!("{}", style("=== CSV Files Exported ===").bold());
            for export in exports {
                println!("  {} ({} {})", export.path.display(), export.rows, export.unit);
            }
        }
    }

    if !rendered_charts.is_empty() {
        let paths = write_charts(&session.config.output.plots_directory, &rendered_charts)
            .context("Failed to write charts")?;
        // keep stdout parseable for JSON
        let listing = paths
            .iter()
            .map(|p| format!("  Created: {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n");
        if format == OutputFormat::Json {
            eprintln!("=== Visualizations Generated ===\n{listing}");
        } else {
            println!("\n{}\n{listing}", style("=== Visualizations Generated ===").bold());
        }
    }

    Ok(())
}

fn render_charts(session: &Session, stats: &StatsReport) -> anyhow::Result<Vec<RenderedChart>> {
    let Some(freq) = &stats.frequency else {
        warn!(event = "analysis.charts.skipped", reason = "no commits");
        return Ok(Vec::new());
    };
    let renderer = ChartRenderer::new(&session.config.visualization)?;
    renderer.render_all(freq).context("Failed to render charts")
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
