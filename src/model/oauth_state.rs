use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::util::parse::parse_snowflake;

/// A pending account-link attempt, consumed once by the OAuth redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct OauthState {
    pub state: String,
    pub discord_id: u64,
    pub expires_at: DateTime<Utc>,
}

impl OauthState {
    pub fn from_entity(entity: entity::oauth_state::Model) -> Result<Self, DbErr> {
        Ok(Self {
            state: entity.state,
            discord_id: parse_snowflake(&entity.discord_id, "discord_id")?,
            expires_at: entity.expires_at,
        })
    }
}
