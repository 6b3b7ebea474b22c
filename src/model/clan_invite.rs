use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::util::parse::parse_snowflake;

/// A clan application already posted to the mod channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingClanInvite {
    pub membership_id: String,
    pub membership_type: i32,
    pub bungie_name: String,
    pub guild_id: u64,
    pub message_id: u64,
    pub expires_at: DateTime<Utc>,
}

impl PendingClanInvite {
    pub fn from_entity(entity: entity::pending_clan_invite::Model) -> Result<Self, DbErr> {
        Ok(Self {
            membership_id: entity.membership_id,
            membership_type: entity.membership_type,
            bungie_name: entity.bungie_name,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            message_id: parse_snowflake(&entity.message_id, "message_id")?,
            expires_at: entity.expires_at,
        })
    }
}

/// An applicant waiting in the Bungie clan queue.
#[derive(Debug, Clone, PartialEq)]
pub struct ClanApplicant {
    pub membership_id: String,
    pub membership_type: i32,
    pub bungie_name: String,
    pub applied_at: Option<DateTime<Utc>>,
}
