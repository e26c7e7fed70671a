//! Environment-based application configuration.
//!
//! All configuration comes from environment variables (a `.env` file is loaded
//! at startup). The clan registry is part of the configuration: clans are
//! declared as numbered variable groups (`CLAN1_ROLE_ID`, `CLAN1_NAME`,
//! optional `CLAN1_ALIASES`, then `CLAN2_...` and so on) and passed into the
//! engines explicitly rather than looked up ambiently.

use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub discord_guild_id: u64,

    pub api_token: String,
    pub api_bind_addr: String,

    pub clans: ClanConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: require_env("DATABASE_URL")?,
            discord_bot_token: require_env("DISCORD_BOT_TOKEN")?,
            discord_guild_id: parse_u64_env("DISCORD_GUILD_ID")?,
            api_token: require_env("API_TOKEN")?,
            api_bind_addr: std::env::var("API_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            clans: ClanConfig::from_env()?,
        })
    }
}

/// One configured clan: the Discord role that defines its roster, a display
/// name, and the aliases members may use to refer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanDef {
    /// Discord role id backing the clan, as stored in the database.
    pub role_id: String,
    /// Human-readable clan name.
    pub name: String,
    /// Alternative names accepted wherever a clan is referenced.
    pub aliases: Vec<String>,
}

/// The clan registry handed to the engines at construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClanConfig {
    clans: Vec<ClanDef>,
}

impl ClanConfig {
    /// Creates a registry from explicit definitions. Used directly by tests;
    /// production code goes through [`ClanConfig::from_env`].
    pub fn new(clans: Vec<ClanDef>) -> Self {
        Self { clans }
    }

    /// Loads the registry from numbered `CLAN{n}_*` environment variables.
    ///
    /// Reads groups starting at `CLAN1_` and stops at the first missing
    /// `CLAN{n}_ROLE_ID`. Each group requires a name; aliases are an optional
    /// comma-separated list. At least one clan must be configured.
    ///
    /// # Returns
    /// - `Ok(ClanConfig)` - The parsed registry
    /// - `Err(ConfigError)` - Missing or non-numeric variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut clans = Vec::new();

        for n in 1.. {
            let Ok(role_id) = std::env::var(format!("CLAN{}_ROLE_ID", n)) else {
                break;
            };

            if role_id.parse::<u64>().is_err() {
                return Err(ConfigError::InvalidEnvVar {
                    name: format!("CLAN{}_ROLE_ID", n),
                    value: role_id,
                    reason: "expected a numeric Discord role id".to_string(),
                });
            }

            let name = std::env::var(format!("CLAN{}_NAME", n))
                .map_err(|_| ConfigError::MissingEnvVar(format!("CLAN{}_NAME", n)))?;

            let aliases = std::env::var(format!("CLAN{}_ALIASES", n))
                .map(|value| {
                    value
                        .split(',')
                        .map(|alias| alias.trim().to_string())
                        .filter(|alias| !alias.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            clans.push(ClanDef {
                role_id,
                name,
                aliases,
            });
        }

        if clans.is_empty() {
            return Err(ConfigError::MissingEnvVar("CLAN1_ROLE_ID".to_string()));
        }

        Ok(Self { clans })
    }

    /// Iterates over the configured clans.
    pub fn iter(&self) -> impl Iterator<Item = &ClanDef> + '_ {
        self.clans.iter()
    }

    /// Resolves a user-supplied clan reference: role id, name, or alias
    /// (names and aliases case-insensitively).
    pub fn resolve(&self, key: &str) -> Option<&ClanDef> {
        self.clans.iter().find(|clan| {
            clan.role_id == key
                || clan.name.eq_ignore_ascii_case(key)
                || clan
                    .aliases
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(key))
        })
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_u64_env(name: &str) -> Result<u64, ConfigError> {
    let value = require_env(name)?;
    value.parse().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
        reason: "expected a numeric Discord id".to_string(),
    })
}
