use crate::analysis::{analyze_frequency, load_session};
use crate::cli::CommonArgs;
use crate::render::{write_charts, ChartRenderer};
use anyhow::Context;
use std::path::PathBuf;

pub fn exec(common: CommonArgs, out_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let session = load_session(&common)?;

    let Some(freq) = analyze_frequency(&session.commits) else {
        println!("No data to display");
        return Ok(());
    };

    let charts = ChartRenderer::new(&session.config.visualization)?
        .render_all(&freq)
        .context("Failed to render charts")?;

    let dir = out_dir.unwrap_or_else(|| session.config.output.plots_directory.clone());
    let paths = write_charts(&dir, &charts)
        .with_context(|| format!("Failed to write charts to {}", dir.display()))?;

    println!("=== Visualizations Generated ===");
    for path in paths {
        println!("  Created: {}", path.display());
    }
    Ok(())
}
