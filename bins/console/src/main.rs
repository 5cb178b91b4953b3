//! Atelier console.
//!
//! Thin command-line front end over the client desks: every command loads
//! the saved session, runs one desk operation and prints the result.

mod cli;
mod commands;
mod print;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_client::ClientError;
use atelier_shared::AppConfig;

use cli::Cli;
use commands::Console;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let command = cli.command.name();

    match run(cli).await {
        Ok(()) => {
            info!(command, "Command finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(command, error = %format!("{err:#}"), "Command failed");
            let message = err
                .downcast_ref::<ClientError>()
                .map_or_else(|| format!("{err:#}"), ClientError::user_message);
            eprintln!("Lỗi: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    info!(command = cli.command.name(), "Running command");
    Console::new(&config)?.run(cli.command).await
}
