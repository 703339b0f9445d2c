use clap::Parser;
use pairsight::cli::{AnalyzeConfig, Cli, Commands, CustomConfig};
use pairsight::commands::{run_analyze, run_custom};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.verbose.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Analyze {
            data_dir,
            window,
            min_correlation,
            output,
            trade_log,
        } => {
            let config = AnalyzeConfig::new(data_dir, window, min_correlation, output, trade_log)?;
            run_analyze(config)?;
        }
        Commands::Custom {
            data_dir,
            window,
            anchor,
            symbols,
            output,
            trade_log,
        } => {
            let config = CustomConfig::new(data_dir, window, anchor, &symbols, output, trade_log)?;
            run_custom(config)?;
        }
    }

    Ok(())
}
