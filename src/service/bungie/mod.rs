//! Bungie.net integration.
//!
//! - `client` - `BungieClient`, the reqwest/oauth2 implementation of both traits
//! - `link` - Account linking through the persisted OAuth state
//! - `types` - Platform response shapes

pub mod client;
pub mod link;
pub mod types;

#[cfg(test)]
pub mod fake;

use std::collections::HashSet;

use serenity::async_trait;

use crate::{
    error::AppError,
    model::{bungie_profile::LinkedAccount, clan_invite::ClanApplicant},
};

/// Clan endpoints, acting with the token of the guild's clan admin.
#[async_trait]
pub trait ClanApi: Send + Sync {
    /// Destiny membership ids of everyone currently in the clan.
    async fn clan_member_ids(&self, admin_discord_id: u64) -> Result<HashSet<String>, AppError>;

    async fn pending_applicants(
        &self,
        admin_discord_id: u64,
    ) -> Result<Vec<ClanApplicant>, AppError>;

    async fn approve(
        &self,
        admin_discord_id: u64,
        membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError>;

    async fn deny(
        &self,
        admin_discord_id: u64,
        membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError>;

    async fn kick(
        &self,
        admin_discord_id: u64,
        membership_type: i32,
        membership_id: &str,
    ) -> Result<(), AppError>;
}

/// OAuth side of account linking.
#[async_trait]
pub trait BungieAuth: Send + Sync {
    /// Authorize URL carrying `state`.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchanges an authorization code and resolves the Destiny membership behind it.
    async fn link_account(&self, code: &str) -> Result<LinkedAccount, AppError>;
}
