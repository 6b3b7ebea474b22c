use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::util::parse::parse_snowflake;

/// A Discord user's linked Bungie account and its OAuth tokens.
#[derive(Clone, PartialEq)]
pub struct BungieProfile {
    pub discord_id: u64,
    /// Destiny membership id as returned by Bungie.
    pub membership_id: String,
    pub membership_type: i32,
    pub bungie_name: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_expires_at: DateTime<Utc>,
}

impl BungieProfile {
    pub fn from_entity(entity: entity::bungie_profile::Model) -> Result<Self, DbErr> {
        Ok(Self {
            discord_id: parse_snowflake(&entity.discord_id, "discord_id")?,
            membership_id: entity.membership_id,
            membership_type: entity.membership_type,
            bungie_name: entity.bungie_name,
            access_token: entity.access_token,
            refresh_token: entity.refresh_token,
            token_expires_at: entity.token_expires_at,
        })
    }

    pub fn is_token_expired(&self, now: DateTime<Utc>) -> bool {
        self.token_expires_at <= now
    }
}

impl std::fmt::Debug for BungieProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BungieProfile")
            .field("discord_id", &self.discord_id)
            .field("membership_id", &self.membership_id)
            .field("membership_type", &self.membership_type)
            .field("bungie_name", &self.bungie_name)
            .field("token_expires_at", &self.token_expires_at)
            .finish_non_exhaustive()
    }
}

/// Result of completing the OAuth flow, ready to be stored.
#[derive(Clone)]
pub struct LinkedAccount {
    pub membership_id: String,
    pub membership_type: i32,
    pub bungie_name: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_expires_at: DateTime<Utc>,
}
