mod cli;
mod config;
mod errors;
mod export;
mod loader;
mod models;
mod pipeline;
mod render;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::AppError;
use crate::export::Exporter;
use crate::pipeline::generate_resume;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app) => {
                eprintln!("Error: {app}");
                ExitCode::from(app.exit_code())
            }
            None => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    info!("cvbuilder v{}", env!("CARGO_PKG_VERSION"));

    let options = cli.export_options(&config);
    let artifacts =
        generate_resume(&cli.request(), || Exporter::from_config(&config, options)).await?;

    println!("{}", artifacts.html.display());
    for path in [artifacts.pdf, artifacts.png].into_iter().flatten() {
        println!("{}", path.display());
    }

    Ok(())
}
