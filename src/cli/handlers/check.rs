//! Handler for the `check` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::NotionClient;
use crate::cli::CheckArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};

/// Result of a connectivity check.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub bot_name: String,
    pub bot_kind: String,
}

/// Handle the `check` command: token present and plausible, API reachable.
pub fn handle_check(args: &CheckArgs, config: &Config) -> Result<()> {
    let token = config.token()?;
    let client = NotionClient::new(token);

    let bot = client
        .whoami()
        .context("could not reach the API; check your token and network")?;

    match args.format {
        OutputFormat::Human => {
            println!("token found and plausible");
            println!("connected as: {} (type: {})", bot.name, bot.kind);
        }
        OutputFormat::Json => Output::new(CheckResult {
            bot_name: bot.name,
            bot_kind: bot.kind,
        })
        .print(),
    }

    Ok(())
}
