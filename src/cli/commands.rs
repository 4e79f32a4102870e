use std::time::Instant;
use tracing::info;

use crate::cli::args::Cli;
use crate::config::AppConfig;
use crate::error::Result;
use crate::fetchers::WeatherUnionClient;
use crate::processors::{BatchRunner, KeyRotator};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, WriteSummary};

/// One complete poll. Fetch failures end up in the summary; only configuration
/// and write errors are returned.
pub async fn run(cli: Cli) -> Result<WriteSummary> {
    let start = Instant::now();

    let mut run_config = AppConfig::load(cli.config.as_deref())?.resolve()?;
    if let Some(dir) = cli.output_dir {
        run_config.output_dir = dir;
    }

    let rotator = KeyRotator::new(run_config.keys)?;
    let client = WeatherUnionClient::new(&run_config.api)?;
    info!(endpoint = %client.base_url(), "Polling locality weather");

    let progress = if cli.quiet {
        ProgressReporter::silent()
    } else {
        ProgressReporter::new(
            run_config.localities.len() as u64,
            "Fetching locality weather...",
            false,
        )
    };

    let runner = BatchRunner::new(client, rotator);
    let batch = runner.run(&run_config.localities, Some(&progress)).await?;
    progress.finish_with_message(&batch.summary());

    let writer = CsvWriter::new(run_config.output_dir);
    let summary = writer.write_batch(batch)?;

    info!(
        path = %summary.path.display(),
        rows = summary.rows,
        failures = summary.failures,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Run complete"
    );

    Ok(summary)
}
