//! OpportunAI application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the catalog, chat session or auth client the subcommand needs
//! 4. Run the subcommand

mod account;
mod chat;
mod cli;
mod listing;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use opportunai_auth::{AuthClient, CredentialStore};
use opportunai_chat::{ChatError, ConversationSession, Delay, FixedDelay, IntentResolver, NoDelay};
use opportunai_core::{Catalog, OpportunaiConfig};

use crate::account::AccountError;
use crate::cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = OpportunaiConfig::load_or_default(&config_file);

    // Tracing. Logs go to stderr so command output stays clean.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting OpportunAI v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    let catalog = Arc::new(Catalog::reference());

    match args.command() {
        Command::Chat { no_delay } => {
            if !config.chat.enabled {
                return Err(ChatError::Disabled.into());
            }
            let delay: Arc<dyn Delay> = if *no_delay || config.chat.reply_delay_ms == 0 {
                Arc::new(NoDelay)
            } else {
                Arc::new(FixedDelay::from_millis(config.chat.reply_delay_ms))
            };
            let resolver = IntentResolver::new(Arc::clone(&catalog))
                .with_high_compatibility(config.chat.high_compatibility);
            let session = ConversationSession::new(Arc::new(resolver), delay);
            chat::run(session).await?;
        }
        Command::Tenders(list) => print!("{}", listing::tenders(&catalog, list)?),
        Command::Companies(list) => print!("{}", listing::companies(&catalog, list)?),
        Command::Login {
            email,
            password,
            remember_me,
        } => {
            let client = auth_client(&args, &config)?;
            return Ok(report(
                account::login(&client, email, password, *remember_me).await,
            ));
        }
        Command::Register(register) => {
            let client = auth_client(&args, &config)?;
            return Ok(report(account::register(&client, register).await));
        }
        Command::Profile { json } => {
            let client = auth_client(&args, &config)?;
            return Ok(report(account::profile(&client, *json).await));
        }
        Command::Logout => {
            let client = auth_client(&args, &config)?;
            return Ok(report(account::logout(&client).await));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Auth client over the credential store in the data directory.
fn auth_client(
    args: &CliArgs,
    config: &OpportunaiConfig,
) -> Result<AuthClient, opportunai_auth::AuthError> {
    let data_dir = args.resolve_data_dir(&config.general.data_dir);
    let store = Arc::new(CredentialStore::open(&data_dir));
    let mut api = config.api.clone();
    api.base_url = args.resolve_api_url(&api.base_url);
    let client = AuthClient::from_config(&api, store)?;
    tracing::debug!(base_url = client.base_url(), "Auth client ready");
    Ok(client)
}

/// Print an account command's outcome and map it to an exit code.
fn report(result: Result<String, AccountError>) -> ExitCode {
    match result {
        Ok(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = %e.source, "Account command failed");
            eprintln!("{}", e.message);
            ExitCode::FAILURE
        }
    }
}
