//! Environment-driven configuration for Mercury.
//!
//! All settings come from environment variables: credentials for the
//! generator and delivery backends, the webhook verification secret, and
//! optional overrides for model, token limit, system prompt, and data
//! directory. Secrets are wrapped in [`secrecy::SecretString`] as soon as
//! they are read and never appear in Debug output.

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default model for the Anthropic generator.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default per-reply output token limit.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default system instruction sent with every generation call.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant replying over WhatsApp. \
     Keep replies concise, friendly, and in plain text.";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug)]
pub struct Config {
    pub anthropic_api_key: SecretString,
    pub model: String,
    pub max_tokens: u32,
    pub system_prompt: String,
    pub whatsapp_access_token: SecretString,
    pub phone_number_id: String,
    pub verify_token: String,
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` goes through here; tests supply a map instead of
    /// mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |var: &'static str| lookup(var).ok_or(ConfigError::MissingVar(var));

        let max_tokens = match lookup("MERCURY_MAX_TOKENS") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                var: "MERCURY_MAX_TOKENS",
                reason: format!("{e}"),
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        let data_dir = match lookup("MERCURY_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".mercury"),
        };

        Ok(Self {
            anthropic_api_key: SecretString::from(require("ANTHROPIC_API_KEY")?),
            model: lookup("MERCURY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            system_prompt: lookup("MERCURY_SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            whatsapp_access_token: SecretString::from(require("WHATSAPP_ACCESS_TOKEN")?),
            phone_number_id: require("WHATSAPP_PHONE_NUMBER_ID")?,
            verify_token: require("WEBHOOK_VERIFY_TOKEN")?,
            data_dir,
        })
    }

    /// SQLite URL for the history database inside the data directory.
    pub fn database_url(&self) -> String {
        format!(
            "sqlite://{}?mode=rwc",
            self.data_dir.join("mercury.db").display()
        )
    }
}
