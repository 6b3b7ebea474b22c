use serenity::all::{Context, Message};

use crate::{
    bot::reply,
    error::{auth::AuthError, AppError},
    service::bungie::link::{AccountLinkService, OAuthRedirect},
};

use super::Handler;

/// Completes an account link from a redirect URL pasted into the bot's DMs.
///
/// Only DMs carrying both `code=` and `state=` are considered. The state must have been
/// issued to the author.
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot || message.guild_id.is_some() {
        return;
    }
    if !(message.content.contains("code=") && message.content.contains("state=")) {
        return;
    }

    let result = complete_link(handler, &message).await;
    if let Err(e) = message
        .channel_id
        .say(&ctx.http, reply::link_result(&result))
        .await
    {
        tracing::error!(
            "Failed to answer pasted link from user {}: {}",
            message.author.id,
            e
        );
    }
}

async fn complete_link(
    handler: &Handler,
    message: &Message,
) -> Result<crate::model::bungie_profile::BungieProfile, AppError> {
    let auth = handler.auth.as_deref().ok_or(AuthError::Disabled)?;
    let redirect = OAuthRedirect::from_pasted(&message.content)?;

    AccountLinkService::new(&handler.db, auth)
        .complete(
            &redirect,
            Some(message.author.id.get()),
            handler.clock.now(),
        )
        .await
}
