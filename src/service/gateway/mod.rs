//! Discord side effects used by services and scheduled jobs.
//!
//! Everything the bot does to Discord outside of interaction replies goes through
//! `DiscordGateway`, so jobs can run against `SerenityGateway` in production and against a
//! recording fake in tests.

pub mod client;

#[cfg(test)]
pub mod fake;

use serenity::{
    all::{CreateMessage, EditMessage},
    async_trait,
};

use crate::error::AppError;

pub use client::SerenityGateway;

/// Role of a guild as seen by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRole {
    pub id: u64,
    pub name: String,
}

/// Member of a guild with the roles they currently hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub user_id: u64,
    pub is_bot: bool,
    pub role_ids: Vec<u64>,
}

#[async_trait]
pub trait DiscordGateway: Send + Sync {
    /// Posts a message and returns its id.
    async fn send_message(&self, channel_id: u64, message: CreateMessage) -> Result<u64, AppError>;

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError>;

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError>;

    /// Sends a direct message to a user.
    async fn send_dm(&self, user_id: u64, message: CreateMessage) -> Result<(), AppError>;

    /// Finds a message the bot posted among the last 50 of a channel whose first embed
    /// has the given title.
    async fn find_bot_message(
        &self,
        channel_id: u64,
        embed_title: &str,
    ) -> Result<Option<u64>, AppError>;

    /// Creates a role without permissions and returns its id.
    async fn create_role(
        &self,
        guild_id: u64,
        name: &str,
        color: u32,
        mentionable: bool,
    ) -> Result<u64, AppError>;

    async fn delete_role(&self, guild_id: u64, role_id: u64) -> Result<(), AppError>;

    async fn guild_roles(&self, guild_id: u64) -> Result<Vec<GuildRole>, AppError>;

    async fn add_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), AppError>;

    async fn remove_role(&self, guild_id: u64, user_id: u64, role_id: u64)
        -> Result<(), AppError>;

    /// Creates a voice channel under the category of `text_channel_id` and returns its id.
    async fn create_voice_channel(
        &self,
        guild_id: u64,
        name: &str,
        text_channel_id: u64,
    ) -> Result<u64, AppError>;

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;

    /// Opens a thread on a message and returns the thread id.
    async fn create_thread(
        &self,
        channel_id: u64,
        message_id: u64,
        name: &str,
    ) -> Result<u64, AppError>;

    /// Users currently connected to a voice channel.
    ///
    /// # Returns
    /// - `Ok(Some(users))` - Channel exists, possibly empty
    /// - `Ok(None)` - The guild is known but the channel no longer exists
    /// - `Err(AppError)` - The guild is not available
    async fn voice_channel_members(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<Vec<u64>>, AppError>;

    /// Voice channel a user is connected to, if any.
    async fn member_voice_channel(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<u64>, AppError>;

    async fn guild_members(&self, guild_id: u64) -> Result<Vec<GuildMember>, AppError>;

    async fn kick_member(&self, guild_id: u64, user_id: u64, reason: &str)
        -> Result<(), AppError>;
}
