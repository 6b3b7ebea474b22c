mod bot;
mod config;
mod controller;
mod data;
mod error;
mod model;
mod router;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use crate::{
    bot::handler::Handler,
    config::Config,
    error::AppError,
    scheduler::JobContext,
    service::{
        bungie::BungieAuth,
        gateway::{DiscordGateway, SerenityGateway},
        voice::VoiceTracker,
    },
    state::AppState,
    util::clock::{Clock, SystemClock},
};

/// Base pause between consecutive DMs.
const DM_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let bungie = startup::setup_bungie_client(&config, &db, http_client, clock.clone())?;
    let auth = bungie.clone().map(|c| c as Arc<dyn BungieAuth>);
    let clan = startup::clan_api(&bungie);

    tracing::info!("Starting clanbot");

    let handler = Handler {
        db: db.clone(),
        clock: clock.clone(),
        auth: auth.clone(),
        clan: clan.clone(),
        voice: VoiceTracker::new(),
        command_guild_id: config.guild_id,
        dm_delay: DM_DELAY,
    };
    let bot_client = bot::start::init_bot(&config, handler).await?;
    let discord: Arc<dyn DiscordGateway> = Arc::new(SerenityGateway::new(
        bot_client.http.clone(),
        bot_client.cache.clone(),
    ));

    let _scheduler = scheduler::start_scheduler(JobContext {
        db: db.clone(),
        discord: discord.clone(),
        clock: clock.clone(),
        clan,
        dm_delay: DM_DELAY,
    })
    .await?;

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let listener = tokio::net::TcpListener::bind(&config.http_bind_addr).await?;
    tracing::info!("HTTP server listening on {}", config.http_bind_addr);

    let app = router::router().with_state(AppState::new(db, discord, auth, clock));
    axum::serve(listener, app).await?;

    Ok(())
}
