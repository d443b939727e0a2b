//! Product-availability monitoring daemon entry point: loads config,
//! starts logging, and runs the engine until cancellation.

use clap::Parser;
use stockwatch_shutdown::ShutdownSignal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Polls product feeds for watched variants and dispatches webhook notifications")]
struct Cli {
    /// Path to the YAML config file.
    #[arg(long, default_value = "config/config.yaml")]
    config: String,

    /// Raise the log level to debug.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .init();

    let cfg = match stockwatch_config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!(error = %err, config = %cli.config, "failed to load config");
            std::process::exit(1);
        }
    };

    let shutdown = ShutdownSignal::new();
    stockwatch_engine::run(cfg, shutdown).await;
}
