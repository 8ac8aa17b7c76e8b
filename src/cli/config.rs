//! Configuration and API token resolution.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::PathBuf;

const MISSING_TOKEN_HELP: &str = "\
API token not found!

Set your token using one of these methods:

1. Environment variable:
   export NOTION_TOKEN='your_token_here'

2. Config file (~/.config/notedown/config.toml):
   token = \"your_token_here\"

To get a token:
1. Go to https://www.notion.com/my-integrations
2. Create a new integration
3. Copy the 'Internal Integration Secret'
4. Share your pages with the integration";

/// Application configuration loaded from the config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API token (the NOTION_TOKEN environment variable takes precedence)
    pub token: Option<String>,

    /// Default output directory for exports
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notedown/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notedown")
            .join("config.toml")
    }

    /// Resolve the API token, with the environment taking precedence.
    ///
    /// # Errors
    ///
    /// Fails with a remediation message when no token can be found, or
    /// when the found token does not look like one the API issues.
    pub fn token(&self) -> Result<String> {
        let env_token = std::env::var("NOTION_TOKEN").ok().filter(|t| !t.is_empty());
        resolve_token(env_token, self.token.as_deref())
    }

    /// Resolve the output directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--output` argument
    /// 2. Config file `output` setting
    /// 3. `notion` in the current directory
    pub fn output_dir(&self, cli_output: Option<&PathBuf>) -> PathBuf {
        cli_output
            .cloned()
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from("notion"))
    }
}

fn resolve_token(env_token: Option<String>, file_token: Option<&str>) -> Result<String> {
    let token = match env_token.or_else(|| file_token.map(str::to_string)) {
        Some(token) => token,
        None => bail!("{MISSING_TOKEN_HELP}"),
    };

    if !is_plausible_token(&token) {
        bail!(
            "the API token appears to be invalid\n\
             Tokens start with 'secret_' or 'ntn_' and are quite long.\n\
             Check your token and try again."
        );
    }

    Ok(token)
}

/// Basic shape check; the API itself has the final say.
fn is_plausible_token(token: &str) -> bool {
    (token.starts_with("secret_") || token.starts_with("ntn_")) && token.len() >= 20
}
