use serenity::all::{Client, GatewayIntents};

use crate::{config::Config, error::AppError};

use super::handler::Handler;

/// Gateway intents listed in the module documentation.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Builds the Discord client without connecting.
///
/// The client's `http` and `cache` are shared with the scheduler and the HTTP server
/// before `start_bot` takes ownership of it.
pub async fn init_bot(config: &Config, handler: Handler) -> Result<Client, AppError> {
    let client = Client::builder(&config.discord_bot_token, intents())
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects to the gateway and processes events until shutdown.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
