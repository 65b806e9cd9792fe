mod args;
mod banner;
mod conf;
mod run;
mod term;
mod transport;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::MonitorArgs;
use crate::conf::MonitorConfig;
use crate::term::TermCaps;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = MonitorArgs::parse();
    let config = MonitorConfig::load(&args)
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("Failed to load configuration")?;
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Configuration validation failed")?;

    let caps = TermCaps::detect(config.color);

    info!("Opening serial device {} at {} baud", config.device, config.baud);
    let mut port = transport::open(&config.device, config.baud)
        .with_context(|| format!("Failed to open serial device {}", config.device))?;

    run::run(&config, caps, &mut port).await
}

/// Diagnostics go to stderr; stdout is reserved for banners and trace lines.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monitor=info,decoder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
