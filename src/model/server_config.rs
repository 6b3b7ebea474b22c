//! Per-guild configuration.

use sea_orm::DbErr;

use crate::util::parse::{parse_optional_snowflake, parse_snowflake};

/// Guild settings. Every field is optional and unset fields disable the feature that
/// needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub guild_id: u64,
    /// Where the daily digest is posted.
    pub digest_channel_id: Option<u64>,
    /// Where the weekly leaderboard and promotions are posted.
    pub ranking_channel_id: Option<u64>,
    /// Where moderation notes and clan applications are posted.
    pub mod_channel_id: Option<u64>,
    pub penalty_role_id: Option<u64>,
    /// Role mirroring Bungie clan membership.
    pub clan_role_id: Option<u64>,
    /// Discord user whose Bungie token performs clan actions.
    pub clan_admin_id: Option<u64>,
}

impl ServerConfig {
    /// Empty configuration for a guild that has never been configured.
    pub fn empty(guild_id: u64) -> Self {
        Self {
            guild_id,
            ..Default::default()
        }
    }

    pub fn from_entity(entity: entity::server_config::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            digest_channel_id: parse_optional_snowflake(
                entity.digest_channel_id.as_deref(),
                "digest_channel_id",
            )?,
            ranking_channel_id: parse_optional_snowflake(
                entity.ranking_channel_id.as_deref(),
                "ranking_channel_id",
            )?,
            mod_channel_id: parse_optional_snowflake(
                entity.mod_channel_id.as_deref(),
                "mod_channel_id",
            )?,
            penalty_role_id: parse_optional_snowflake(
                entity.penalty_role_id.as_deref(),
                "penalty_role_id",
            )?,
            clan_role_id: parse_optional_snowflake(entity.clan_role_id.as_deref(), "clan_role_id")?,
            clan_admin_id: parse_optional_snowflake(
                entity.clan_admin_id.as_deref(),
                "clan_admin_id",
            )?,
        })
    }
}

/// The four tier roles of the weekly ranking, lowest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRoles {
    pub guild_id: u64,
    pub tier_role_ids: [u64; 4],
}

impl RankingRoles {
    pub fn from_entity(entity: entity::ranking_roles::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            tier_role_ids: [
                parse_snowflake(&entity.tier_1_role_id, "tier_1_role_id")?,
                parse_snowflake(&entity.tier_2_role_id, "tier_2_role_id")?,
                parse_snowflake(&entity.tier_3_role_id, "tier_3_role_id")?,
                parse_snowflake(&entity.tier_4_role_id, "tier_4_role_id")?,
            ],
        })
    }

    /// Role id for a tier in `1..=4`.
    pub fn role_for_tier(&self, tier: u8) -> Option<u64> {
        match tier {
            1..=4 => Some(self.tier_role_ids[(tier - 1) as usize]),
            _ => None,
        }
    }
}
