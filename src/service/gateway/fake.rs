//! Recording gateway for tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use serde_json::Value;
use serenity::{
    all::{CreateMessage, EditMessage},
    async_trait,
};

use crate::error::AppError;

use super::{DiscordGateway, GuildMember, GuildRole};

/// A side effect performed through the gateway.
///
/// Message bodies are kept as the JSON serenity would send, so tests can assert on embed
/// titles, fields and component ids.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscordCall {
    SendMessage {
        channel_id: u64,
        message_id: u64,
        body: Value,
    },
    EditMessage {
        channel_id: u64,
        message_id: u64,
        body: Value,
    },
    DeleteMessage {
        channel_id: u64,
        message_id: u64,
    },
    SendDm {
        user_id: u64,
        body: Value,
    },
    CreateRole {
        guild_id: u64,
        role_id: u64,
        name: String,
        color: u32,
    },
    DeleteRole {
        guild_id: u64,
        role_id: u64,
    },
    AddRole {
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    },
    RemoveRole {
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    },
    CreateVoiceChannel {
        guild_id: u64,
        channel_id: u64,
        name: String,
        text_channel_id: u64,
    },
    DeleteChannel {
        channel_id: u64,
    },
    CreateThread {
        channel_id: u64,
        message_id: u64,
        name: String,
    },
    KickMember {
        guild_id: u64,
        user_id: u64,
    },
}

#[derive(Default)]
struct FakeState {
    next_id: u64,
    calls: Vec<DiscordCall>,
    /// Channels that exist, mapped to the users connected to them.
    voice_channels: HashMap<u64, Vec<u64>>,
    member_voice: HashMap<u64, u64>,
    members: Vec<GuildMember>,
    roles: Vec<GuildRole>,
    bot_messages: HashMap<(u64, String), u64>,
    missing_messages: HashSet<u64>,
    closed_dms: HashSet<u64>,
    unknown_guilds: HashSet<u64>,
    fail_role_creation: bool,
}

/// In-memory `DiscordGateway` that records every call.
///
/// Created ids are handed out from a counter starting at 9000.
pub struct FakeDiscord {
    state: Mutex<FakeState>,
}

impl Default for FakeDiscord {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDiscord {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_id: 9000,
                ..Default::default()
            }),
        }
    }

    pub fn calls(&self) -> Vec<DiscordCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Recipients of every DM sent so far, in order.
    pub fn dm_recipients(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DiscordCall::SendDm { user_id, .. } => Some(user_id),
                _ => None,
            })
            .collect()
    }

    pub fn sent_messages(&self) -> Vec<(u64, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DiscordCall::SendMessage {
                    channel_id, body, ..
                } => Some((channel_id, body)),
                _ => None,
            })
            .collect()
    }

    pub fn edited_messages(&self) -> Vec<(u64, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DiscordCall::EditMessage {
                    message_id, body, ..
                } => Some((message_id, body)),
                _ => None,
            })
            .collect()
    }

    /// Registers a voice channel with the users connected to it.
    pub fn with_voice_channel(self, channel_id: u64, users: &[u64]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.voice_channels.insert(channel_id, users.to_vec());
            for user in users {
                state.member_voice.insert(*user, channel_id);
            }
        }
        self
    }

    pub fn with_member(self, user_id: u64, is_bot: bool, role_ids: &[u64]) -> Self {
        self.state.lock().unwrap().members.push(GuildMember {
            user_id,
            is_bot,
            role_ids: role_ids.to_vec(),
        });
        self
    }

    pub fn with_role(self, id: u64, name: &str) -> Self {
        self.state.lock().unwrap().roles.push(GuildRole {
            id,
            name: name.to_string(),
        });
        self
    }

    /// Makes `find_bot_message` return `message_id` for this channel and title.
    pub fn with_bot_message(self, channel_id: u64, title: &str, message_id: u64) -> Self {
        self.state
            .lock()
            .unwrap()
            .bot_messages
            .insert((channel_id, title.to_string()), message_id);
        self
    }

    /// Editing or deleting this message fails with not-found.
    pub fn with_missing_message(self, message_id: u64) -> Self {
        self.state.lock().unwrap().missing_messages.insert(message_id);
        self
    }

    /// DMs to this user fail as if they had DMs disabled.
    pub fn with_closed_dms(self, user_id: u64) -> Self {
        self.state.lock().unwrap().closed_dms.insert(user_id);
        self
    }

    /// Voice lookups in this guild fail as if it were not cached.
    pub fn with_unknown_guild(self, guild_id: u64) -> Self {
        self.state.lock().unwrap().unknown_guilds.insert(guild_id);
        self
    }

    pub fn with_failing_role_creation(self) -> Self {
        self.state.lock().unwrap().fail_role_creation = true;
        self
    }

    fn record(&self, call: DiscordCall) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn next_id(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.next_id
    }

    fn is_missing(&self, message_id: u64) -> bool {
        self.state
            .lock()
            .unwrap()
            .missing_messages
            .contains(&message_id)
    }
}

fn to_json<T: serde::Serialize>(body: &T) -> Value {
    serde_json::to_value(body).unwrap_or(Value::Null)
}

#[async_trait]
impl DiscordGateway for FakeDiscord {
    async fn send_message(&self, channel_id: u64, message: CreateMessage) -> Result<u64, AppError> {
        let message_id = self.next_id();
        self.record(DiscordCall::SendMessage {
            channel_id,
            message_id,
            body: to_json(&message),
        });
        Ok(message_id)
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: EditMessage,
    ) -> Result<(), AppError> {
        if self.is_missing(message_id) {
            return Err(AppError::NotFound("Unknown Message".to_string()));
        }
        self.record(DiscordCall::EditMessage {
            channel_id,
            message_id,
            body: to_json(&message),
        });
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        if self.is_missing(message_id) {
            return Err(AppError::NotFound("Unknown Message".to_string()));
        }
        self.record(DiscordCall::DeleteMessage {
            channel_id,
            message_id,
        });
        Ok(())
    }

    async fn send_dm(&self, user_id: u64, message: CreateMessage) -> Result<(), AppError> {
        if self.state.lock().unwrap().closed_dms.contains(&user_id) {
            return Err(AppError::Forbidden("Cannot send messages to this user".to_string()));
        }
        self.record(DiscordCall::SendDm {
            user_id,
            body: to_json(&message),
        });
        Ok(())
    }

    async fn find_bot_message(
        &self,
        channel_id: u64,
        embed_title: &str,
    ) -> Result<Option<u64>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .bot_messages
            .get(&(channel_id, embed_title.to_string()))
            .copied())
    }

    async fn create_role(
        &self,
        guild_id: u64,
        name: &str,
        color: u32,
        _mentionable: bool,
    ) -> Result<u64, AppError> {
        if self.state.lock().unwrap().fail_role_creation {
            return Err(AppError::Forbidden("Missing Permissions".to_string()));
        }
        let role_id = self.next_id();
        self.record(DiscordCall::CreateRole {
            guild_id,
            role_id,
            name: name.to_string(),
            color,
        });
        Ok(role_id)
    }

    async fn delete_role(&self, guild_id: u64, role_id: u64) -> Result<(), AppError> {
        self.record(DiscordCall::DeleteRole { guild_id, role_id });
        Ok(())
    }

    async fn guild_roles(&self, _guild_id: u64) -> Result<Vec<GuildRole>, AppError> {
        Ok(self.state.lock().unwrap().roles.clone())
    }

    async fn add_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.record(DiscordCall::AddRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.record(DiscordCall::RemoveRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }

    async fn create_voice_channel(
        &self,
        guild_id: u64,
        name: &str,
        text_channel_id: u64,
    ) -> Result<u64, AppError> {
        let channel_id = self.next_id();
        self.state
            .lock()
            .unwrap()
            .voice_channels
            .insert(channel_id, Vec::new());
        self.record(DiscordCall::CreateVoiceChannel {
            guild_id,
            channel_id,
            name: name.to_string(),
            text_channel_id,
        });
        Ok(channel_id)
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        self.state.lock().unwrap().voice_channels.remove(&channel_id);
        self.record(DiscordCall::DeleteChannel { channel_id });
        Ok(())
    }

    async fn create_thread(
        &self,
        channel_id: u64,
        message_id: u64,
        name: &str,
    ) -> Result<u64, AppError> {
        self.record(DiscordCall::CreateThread {
            channel_id,
            message_id,
            name: name.to_string(),
        });
        Ok(self.next_id())
    }

    async fn voice_channel_members(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<Vec<u64>>, AppError> {
        let state = self.state.lock().unwrap();
        if state.unknown_guilds.contains(&guild_id) {
            return Err(AppError::InternalError(format!(
                "Guild {} is not cached",
                guild_id
            )));
        }
        Ok(state.voice_channels.get(&channel_id).cloned())
    }

    async fn member_voice_channel(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<u64>, AppError> {
        let state = self.state.lock().unwrap();
        if state.unknown_guilds.contains(&guild_id) {
            return Err(AppError::InternalError(format!(
                "Guild {} is not cached",
                guild_id
            )));
        }
        Ok(state.member_voice.get(&user_id).copied())
    }

    async fn guild_members(&self, _guild_id: u64) -> Result<Vec<GuildMember>, AppError> {
        Ok(self.state.lock().unwrap().members.clone())
    }

    async fn kick_member(
        &self,
        guild_id: u64,
        user_id: u64,
        _reason: &str,
    ) -> Result<(), AppError> {
        self.record(DiscordCall::KickMember { guild_id, user_id });
        Ok(())
    }
}
