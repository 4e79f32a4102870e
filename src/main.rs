use anyhow::Context;
use clap::Parser;
use locality_weather::cli::{init_logging, run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref()).context("failed to initialise logging")?;

    let summary = run(cli).await.context("weather poll aborted")?;
    println!("{}", summary.summary());

    Ok(())
}
