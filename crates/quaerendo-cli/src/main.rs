//! Quaerendo CLI - command-line client for the Quaerendo fact-checking platform.

use anyhow::Context;
use clap::Parser;
use quaerendo_cli::commands;
use quaerendo_cli::{Cli, Command, Config, Formatter};
use quaerendo_sdk::ApiClient;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Profile(args) => commands::execute_profile(args, &mut config, &formatter)?,
        Command::Login(args) => {
            commands::execute_login(args, &connect(&config)?, &formatter).await?
        }
        Command::Logout => commands::execute_logout(&connect(&config)?, &formatter)?,
        Command::Register(args) => {
            commands::execute_register(args, &connect(&config)?, &formatter).await?
        }
        Command::Whoami => {
            let (client, storage) = quaerendo_cli::open_client(&config)?;
            commands::execute_whoami(&client, &storage, &formatter)?
        }
        Command::Claims => commands::execute_claims(&connect(&config)?, &formatter).await?,
        Command::Claim(args) => {
            commands::execute_claim(args, &connect(&config)?, &formatter).await?
        }
        Command::Evidence(args) => {
            commands::execute_evidence(args, &connect(&config)?, &formatter).await?
        }
        Command::Open(args) => commands::execute_open(args, &connect(&config)?, &formatter).await?,
        Command::SubmitClaim(args) => {
            commands::execute_submit_claim(args, &connect(&config)?, &formatter).await?
        }
        Command::SubmitEvidence(args) => {
            commands::execute_submit_evidence(args, &connect(&config)?, &formatter).await?
        }
    }

    Ok(())
}

/// Client for the active profile; the profile command never needs one.
fn connect(config: &Config) -> quaerendo_cli::Result<ApiClient> {
    quaerendo_cli::open_client(config).map(|(client, _)| client)
}
