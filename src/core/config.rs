//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::{Context, Result};

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (required)
    pub discord_token: String,

    /// Guild ID for development-mode command registration (optional)
    ///
    /// When set, slash commands register against this guild only, which
    /// propagates instantly. When unset, commands register globally.
    pub discord_guild_id: Option<String>,

    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DISCORD_TOKEN` is required; `DISCORD_GUILD_ID` and `LOG_LEVEL`
    /// are optional.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            discord_token: std::env::var("DISCORD_TOKEN")
                .context("DISCORD_TOKEN must be set in the environment or .env file")?,
            discord_guild_id: std::env::var("DISCORD_GUILD_ID").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_token() {
        std::env::remove_var("DISCORD_TOKEN");
        assert!(Config::from_env().is_err());
    }
}
