//! authlab binary

use std::time::Duration;

use anyhow::{Context, Result};
use authlab_server::cli::{Cli, Commands};
use authlab_server::commands;
use authlab_server::logging::init_logging;
use authlab_server::server::{ServeOptions, serve};
use authlab_token::TokenConfig;
use clap::Parser;

fn token_config(cli: &Cli) -> Result<TokenConfig> {
    let secret = cli
        .secret
        .clone()
        .context("a signing secret is required (--secret or AUTHLAB_SECRET)")?;
    Ok(TokenConfig::new(secret).with_ttl_secs(cli.ttl))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command.clone() {
        Commands::Serve {
            addr,
            session_ttl,
            sweep_interval,
        } => {
            let options = ServeOptions {
                addr,
                session_ttl: chrono::Duration::seconds(session_ttl),
                sweep_interval: Duration::from_secs(sweep_interval.max(1)),
            };
            serve(&token_config(&cli)?, options).await
        }
        Commands::Issue { subject } => commands::issue(&token_config(&cli)?, &subject),
        Commands::Verify { token } => commands::verify(&token_config(&cli)?, &token),
        Commands::Inspect { token } => commands::inspect(&token),
        Commands::HashPassword { password } => commands::hash_password(&password),
    }
}
