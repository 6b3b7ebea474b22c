use serenity::all::{ActivityData, Command, Context, GuildId, Ready};

use crate::bot::command;

use super::Handler;

/// Handles the ready event when the bot connects to Discord.
///
/// Slash commands are registered on every connection. Guild registration applies
/// immediately and is meant for development; global registration can take up to an hour
/// to propagate.
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("the event board")));

    let commands = command::definitions();
    let registered = match handler.command_guild_id {
        Some(guild_id) => GuildId::new(guild_id)
            .set_commands(&ctx.http, commands)
            .await
            .map(|c| c.len()),
        None => Command::set_global_commands(&ctx.http, commands)
            .await
            .map(|c| c.len()),
    };

    match registered {
        Ok(count) => tracing::info!(
            "Registered {} slash commands {}",
            count,
            handler
                .command_guild_id
                .map_or("globally".to_string(), |id| format!("in guild {}", id))
        ),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
