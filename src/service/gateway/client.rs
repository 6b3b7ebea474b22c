use std::sync::Arc;

use serenity::{
    all::{
        AutoArchiveDuration, ChannelId, ChannelType, CreateChannel, CreateMessage, CreateThread,
        EditMessage, EditRole, GetMessages, GuildId, MessageId, Permissions, RoleId, UserId,
    },
    async_trait,
    cache::Cache,
    http::Http,
};

use crate::error::AppError;

use super::{DiscordGateway, GuildMember, GuildRole};

/// Page size for member listing, the maximum Discord accepts.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// How far back `find_bot_message` looks.
const MESSAGE_SEARCH_LIMIT: u8 = 50;

/// Gateway backed by the bot's serenity HTTP client and gateway cache.
///
/// Voice state is read from the cache, which requires the `GUILD_VOICE_STATES` intent.
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }
}

#[async_trait]
impl DiscordGateway for SerenityGateway {
    async fn send_message(&self, channel_id: u64, message: CreateMessage) -> Result<u64, AppError> {
        let sent = ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;

        Ok(sent.id.get())
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .edit_message(&self.http, MessageId::new(message_id), message)
            .await?;

        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete_message(&self.http, MessageId::new(message_id))
            .await?;

        Ok(())
    }

    async fn send_dm(&self, user_id: u64, message: CreateMessage) -> Result<(), AppError> {
        UserId::new(user_id)
            .direct_message(&self.http, message)
            .await?;

        Ok(())
    }

    async fn find_bot_message(
        &self,
        channel_id: u64,
        embed_title: &str,
    ) -> Result<Option<u64>, AppError> {
        let bot_id = self.cache.current_user().id;

        let messages = ChannelId::new(channel_id)
            .messages(&self.http, GetMessages::new().limit(MESSAGE_SEARCH_LIMIT))
            .await?;

        Ok(messages
            .into_iter()
            .find(|msg| {
                msg.author.id == bot_id
                    && msg
                        .embeds
                        .first()
                        .and_then(|embed| embed.title.as_deref())
                        == Some(embed_title)
            })
            .map(|msg| msg.id.get()))
    }

    async fn create_role(
        &self,
        guild_id: u64,
        name: &str,
        color: u32,
        mentionable: bool,
    ) -> Result<u64, AppError> {
        let builder = EditRole::new()
            .name(name)
            .colour(color)
            .mentionable(mentionable)
            .permissions(Permissions::empty());

        let role = GuildId::new(guild_id)
            .create_role(&self.http, builder)
            .await?;

        Ok(role.id.get())
    }

    async fn delete_role(&self, guild_id: u64, role_id: u64) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .delete_role(&self.http, RoleId::new(role_id))
            .await?;

        Ok(())
    }

    async fn guild_roles(&self, guild_id: u64) -> Result<Vec<GuildRole>, AppError> {
        let roles = GuildId::new(guild_id).roles(&self.http).await?;

        Ok(roles
            .into_values()
            .map(|role| GuildRole {
                id: role.id.get(),
                name: role.name,
            })
            .collect())
    }

    async fn add_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                None,
            )
            .await?;

        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                None,
            )
            .await?;

        Ok(())
    }

    async fn create_voice_channel(
        &self,
        guild_id: u64,
        name: &str,
        text_channel_id: u64,
    ) -> Result<u64, AppError> {
        // The event channel may have been deleted; the voice channel then lands at the top level
        let category = match ChannelId::new(text_channel_id).to_channel(&self.http).await {
            Ok(channel) => channel.guild().and_then(|c| c.parent_id),
            Err(e) => {
                tracing::warn!(
                    "Failed to look up category of channel {}: {}",
                    text_channel_id,
                    e
                );
                None
            }
        };

        let mut builder = CreateChannel::new(name).kind(ChannelType::Voice);
        if let Some(category) = category {
            builder = builder.category(category);
        }

        let channel = GuildId::new(guild_id)
            .create_channel(&self.http, builder)
            .await?;

        Ok(channel.id.get())
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id).delete(&self.http).await?;

        Ok(())
    }

    async fn create_thread(
        &self,
        channel_id: u64,
        message_id: u64,
        name: &str,
    ) -> Result<u64, AppError> {
        let builder = CreateThread::new(name).auto_archive_duration(AutoArchiveDuration::OneWeek);

        let thread = ChannelId::new(channel_id)
            .create_thread_from_message(&self.http, MessageId::new(message_id), builder)
            .await?;

        Ok(thread.id.get())
    }

    async fn voice_channel_members(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<Vec<u64>>, AppError> {
        let channel_id = ChannelId::new(channel_id);

        let guild = self
            .cache
            .guild(GuildId::new(guild_id))
            .ok_or_else(|| AppError::InternalError(format!("Guild {} is not cached", guild_id)))?;

        if !guild.channels.contains_key(&channel_id) {
            return Ok(None);
        }

        let members = guild
            .voice_states
            .values()
            .filter(|state| state.channel_id == Some(channel_id))
            .map(|state| state.user_id.get())
            .collect();

        Ok(Some(members))
    }

    async fn member_voice_channel(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<u64>, AppError> {
        let guild = self
            .cache
            .guild(GuildId::new(guild_id))
            .ok_or_else(|| AppError::InternalError(format!("Guild {} is not cached", guild_id)))?;

        Ok(guild
            .voice_states
            .get(&UserId::new(user_id))
            .and_then(|state| state.channel_id)
            .map(|channel| channel.get()))
    }

    async fn guild_members(&self, guild_id: u64) -> Result<Vec<GuildMember>, AppError> {
        let guild_id = GuildId::new(guild_id);
        let mut members = Vec::new();
        let mut after = None;

        loop {
            let page = guild_id
                .members(&self.http, Some(MEMBER_PAGE_SIZE), after)
                .await?;
            let page_len = page.len() as u64;

            after = page.last().map(|m| m.user.id);
            members.extend(page.into_iter().map(|member| GuildMember {
                user_id: member.user.id.get(),
                is_bot: member.user.bot,
                role_ids: member.roles.iter().map(|r| r.get()).collect(),
            }));

            if page_len < MEMBER_PAGE_SIZE {
                break;
            }
        }

        Ok(members)
    }

    async fn kick_member(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .kick_with_reason(&self.http, UserId::new(user_id), reason)
            .await?;

        Ok(())
    }
}
