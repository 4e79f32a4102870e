use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "locality-weather")]
#[command(about = "Fetch current weather for configured localities and save a CSV snapshot")]
#[command(version)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Configuration file (toml, ini, yaml or json) [default: ./config.*]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Base output directory, overrides output.base_dir from the config"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Hide the progress bar")]
    pub quiet: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "locality-weather",
            "--config",
            "conf/config.ini",
            "-o",
            "snapshots",
            "-v",
            "--quiet",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("conf/config.ini")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("snapshots")));
        assert!(cli.verbose);
        assert!(cli.quiet);
        assert!(cli.log_file.is_none());
    }
}
