use crate::render::OutputFormat;
use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitstat")]
#[command(about = "Commit history statistics: authors, date ranges and activity frequency")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Default)]
pub struct CommonArgs {
    #[arg(long, short = 'r', help = "Path to git repository (default: current directory)")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Path to JSON config file (default: ./gitstat.json)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Start from this commit or date (RFC3339, YYYY-MM-DD, or '<n> days ago')")]
    pub since: Option<String>,

    #[arg(long, help = "End at this commit or date (RFC3339, YYYY-MM-DD, or '<n> days ago')")]
    pub until: Option<String>,

    #[arg(long, help = "Exclude merge commits")]
    pub no_merges: bool,

    #[arg(long, help = "Only analyze the most recent N commits")]
    pub max_commits: Option<usize>,

    #[arg(long, help = "Only include authors matching this name or email (repeatable)")]
    pub author: Vec<String>,

    #[arg(long, help = "Exclude authors matching this name or email (repeatable)")]
    pub exclude_author: Vec<String>,

    #[arg(long, short = 'q', help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(long, short = 'v', action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise commit history
    Stats {
        #[arg(long, short = 'o', value_enum, help = "Output format (default from config: text)")]
        format: Option<OutputFormat>,

        #[arg(long, short = 'f', help = "Include commit frequency analysis")]
        frequency: bool,

        #[arg(long, help = "Generate SVG charts (implies --frequency)")]
        charts: bool,

        #[arg(long, help = "HTML report path (with --format html)")]
        report: Option<PathBuf>,
    },
    /// Write commits, authors, frequency and timeline CSV files
    Export {
        #[arg(long, help = "Directory for CSV files (default from config: csv_exports)")]
        out_dir: Option<PathBuf>,
    },
    /// Write SVG charts of hourly, weekday and daily activity
    Chart {
        #[arg(long, help = "Directory for chart files (default from config: plots)")]
        out_dir: Option<PathBuf>,
    },
    /// Show the effective configuration
    Config {
        #[arg(long, help = "Save it to the config path instead of printing")]
        write: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { format, frequency, charts, report } => {
                crate::analysis::exec(self.common, format, frequency, charts, report)
            }
            Commands::Export { out_dir } => crate::export::exec(self.common, out_dir),
            Commands::Chart { out_dir } => crate::charts::exec(self.common, out_dir),
            Commands::Config { write } => crate::config::exec(self.common, write),
        }
    }
}
