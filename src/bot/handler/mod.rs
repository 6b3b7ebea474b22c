use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Interaction, Message, Ready, VoiceState};
use serenity::async_trait;

use crate::{
    service::{
        bungie::{BungieAuth, ClanApi},
        gateway::SerenityGateway,
        voice::VoiceTracker,
    },
    util::clock::Clock,
};

pub mod interaction;
pub mod message;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub clock: Arc<dyn Clock>,
    /// `None` when the Bungie integration is disabled.
    pub auth: Option<Arc<dyn BungieAuth>>,
    pub clan: Option<Arc<dyn ClanApi>>,
    pub voice: VoiceTracker,
    /// Guild to register commands in, global registration when `None`.
    pub command_guild_id: Option<u64>,
    /// Pause between consecutive DMs.
    pub dm_delay: Duration,
}

impl Handler {
    /// Gateway over the context's HTTP client and cache.
    pub fn gateway(ctx: &Context) -> SerenityGateway {
        SerenityGateway::new(ctx.http.clone(), ctx.cache.clone())
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called for slash commands, button presses and modal submissions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }

    /// Called when a member joins, moves between or leaves voice channels
    async fn voice_state_update(&self, _ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(self, old, new).await;
    }

    /// Called when a message is sent in a channel or DM
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self, ctx, message).await;
    }
}
