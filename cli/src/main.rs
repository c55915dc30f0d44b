//! Finance Tracker command-line client.

mod args;
mod commands;
mod redirect;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finance_client::{ClientConfig, FinanceClient};

use crate::args::Cli;
use crate::redirect::TerminalRedirect;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    debug!(
        api_url = %config.api_url,
        session = %config.session_file().display(),
        "Loaded configuration"
    );

    let client = match FinanceClient::from_config(&config, Arc::new(TerminalRedirect)) {
        Ok(client) => client,
        Err(e) => {
            debug!(code = e.code(), "Failed to create client");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let fallback = commands::fallback_message(&cli.command);
    match commands::execute(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(code = e.code(), "Command failed: {}", e);
            eprintln!("Error: {}", e.user_message_or(fallback));
            ExitCode::FAILURE
        }
    }
}
