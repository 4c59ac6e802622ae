pub mod chart;
pub mod csv;
pub mod html;
pub mod json;
pub mod text;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
    Csv,
}

pub use chart::{write_charts, ChartRenderer, RenderedChart};
pub use html::HtmlReporter;
