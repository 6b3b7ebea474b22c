//! Slash command definitions and dispatch.
//!
//! - `event` - `/event create|list|cancel|rsvp`
//! - `config` - `/config ...`, server settings for administrators
//! - `permissions` - `/permissions grant|revoke|list`
//! - `link` - `/link-bungie`

pub mod config;
pub mod event;
pub mod link;
pub mod options;
pub mod permissions;

use serenity::all::{CommandInteraction, Context, CreateCommand};

use super::{handler::Handler, reply};

/// Every command registered on ready.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        event::definition(),
        config::definition(),
        permissions::definition(),
        link::definition(),
    ]
}

pub async fn handle_command(handler: &Handler, ctx: Context, command: CommandInteraction) {
    tracing::debug!(
        "Command /{} from user {}",
        command.data.name,
        command.user.id
    );

    match command.data.name.as_str() {
        event::NAME => event::handle(handler, &ctx, &command).await,
        config::NAME => deferred(&ctx, &command, config::run(handler, &ctx, &command)).await,
        permissions::NAME => {
            deferred(&ctx, &command, permissions::run(handler, &command)).await
        }
        link::NAME => deferred(&ctx, &command, link::run(handler, &ctx, &command)).await,
        other => tracing::warn!("Unknown command /{}", other),
    }
}

/// Defers an ephemeral reply, runs the action and edits the reply with its outcome.
async fn deferred<F>(ctx: &Context, command: &CommandInteraction, action: F)
where
    F: std::future::Future<Output = Result<String, crate::error::AppError>>,
{
    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!("Failed to defer /{}: {}", command.data.name, e);
        return;
    }

    let result = action.await;
    if let Err(e) = command.edit_response(&ctx.http, reply::edit(result)).await {
        tracing::error!("Failed to answer /{}: {}", command.data.name, e);
    }
}
