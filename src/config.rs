use crate::error::{config::ConfigError, AppError};

const DEFAULT_DATABASE_URL: &str = "sqlite://clanbot.db?mode=rwc";
const DEFAULT_HTTP_BIND_ADDR: &str = "0.0.0.0:8080";

const BUNGIE_API_ROOT: &str = "https://www.bungie.net/Platform";
const BUNGIE_AUTH_URL: &str = "https://www.bungie.net/en/OAuth/Authorize";
const BUNGIE_TOKEN_URL: &str = "https://www.bungie.net/Platform/App/OAuth/Token/";

/// Credentials and endpoints for the Bungie.net integration.
///
/// Present only when every required variable is set.
#[derive(Clone, Debug)]
pub struct BungieConfig {
    pub api_key: String,
    pub clan_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: Option<String>,

    pub api_root: String,
    pub auth_url: String,
    pub token_url: String,
}

pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,
    /// Guild to register slash commands in. Commands are global when unset.
    pub guild_id: Option<u64>,
    pub http_bind_addr: String,

    pub bungie: Option<BungieConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let guild_id = match optional_var("GUILD_ID") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                name: "GUILD_ID".to_string(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            database_url: optional_var("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            guild_id,
            http_bind_addr: optional_var("HTTP_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_HTTP_BIND_ADDR.to_string()),
            bungie: bungie_from_env(),
        })
    }
}

/// Reads the Bungie variables, disabling the integration with a warning when any
/// required one is missing.
fn bungie_from_env() -> Option<BungieConfig> {
    let required = [
        "BUNGIE_API_KEY",
        "BUNGIE_CLAN_ID",
        "BUNGIE_CLIENT_ID",
        "BUNGIE_CLIENT_SECRET",
    ];

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| optional_var(name).is_none())
        .collect();

    if !missing.is_empty() {
        tracing::warn!(
            "Bungie integration disabled, missing: {}",
            missing.join(", ")
        );
        return None;
    }

    Some(BungieConfig {
        api_key: optional_var("BUNGIE_API_KEY")?,
        clan_id: optional_var("BUNGIE_CLAN_ID")?,
        client_id: optional_var("BUNGIE_CLIENT_ID")?,
        client_secret: optional_var("BUNGIE_CLIENT_SECRET")?,
        redirect_url: optional_var("BUNGIE_REDIRECT_URL"),
        api_root: BUNGIE_API_ROOT.to_string(),
        auth_url: BUNGIE_AUTH_URL.to_string(),
        token_url: BUNGIE_TOKEN_URL.to_string(),
    })
}

/// Reads a variable, treating an empty value as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
