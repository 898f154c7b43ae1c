mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fitness_coach::config::AppConfig;

use crate::commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let level = if cli.verbose() {
        "debug"
    } else {
        config.log_level.as_str()
    };

    // Logs go to stderr so stdout stays machine-readable JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { cli.execute(config).await })
}
