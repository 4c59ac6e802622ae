use crate::analysis::{aggregate, load_session};
use crate::cli::CommonArgs;
use crate::render::csv::write_bundle;
use anyhow::Context;
use console::style;
use std::path::PathBuf;

pub fn exec(common: CommonArgs, out_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let session = load_session(&common)?;
    let stats = aggregate(&session.commits, true);

    let dir = out_dir.unwrap_or_else(|| session.config.output.csv_directory.clone());
    let exports = write_bundle(&dir, &session.commits, &stats)
        .with_context(|| format!("Failed to export CSV files to {}", dir.display()))?;

    println!("{}", style("Export Summary").bold());
    println!("{}", "─".repeat(50));
    println!("Total commits: {}", style(stats.total_commits).cyan());
    println!("Total files changed: {}", style(stats.totals.files_changed).cyan());
    println!("Total lines added: {}", style(stats.totals.insertions).green());
    println!("Total lines deleted: {}", style(stats.totals.deletions).red());
    println!("Unique authors: {}", style(stats.authors.len()).yellow());

    if let Some(range) = &stats.date_range {
        println!(
            "Date range: {} to {}",
            style(range.first_commit.format("%Y-%m-%d")).dim(),
            style(range.last_commit.format("%Y-%m-%d")).dim()
        );
    }

    println!("\n{}", style("=== CSV Files Exported ===").bold());
    for export in exports {
        println!("  {} ({} {})", export.path.display(), export.rows, export.unit);
    }
    Ok(())
}
