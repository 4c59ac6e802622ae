use anyhow::Result;
use gitstat::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    gitstat::logging::init(cli.common.verbose);
    cli.execute()
}
