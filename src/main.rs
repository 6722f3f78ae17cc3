use anyhow::Result;
use clap::Parser;
use cv_filter::cli::{handle_command, Cli};
use cv_filter::environment::EnvironmentConfig;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never mix with the ranked output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = EnvironmentConfig::load()?;

    handle_command(cli, config).await
}
