//! `/link-bungie`

use serenity::all::{
    CommandInteraction, Context, CreateActionRow, CreateButton, CreateCommand,
    CreateMessage,
};

use crate::{
    bot::handler::Handler,
    error::{auth::AuthError, AppError},
    service::bungie::link::AccountLinkService,
};

pub const NAME: &str = "link-bungie";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME).description("Link your Bungie.net account to your Discord account")
}

/// DMs the authorize link. The redirect comes back to the HTTP callback, or the user
/// pastes it into the same DM.
pub async fn run(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<String, AppError> {
    let auth = handler.auth.as_deref().ok_or(AuthError::Disabled)?;
    let user_id = command.user.id.get();

    let url = AccountLinkService::new(&handler.db, auth)
        .start(user_id, handler.clock.now())
        .await?;

    let message = CreateMessage::new()
        .content(
            "To link your account, press the button below and authorize the app. \
             If your browser ends on an error page, copy its full URL and paste it here.",
        )
        .components(vec![CreateActionRow::Buttons(vec![
            CreateButton::new_link(url).label("Authorize with Bungie.net"),
        ])]);

    match command.user.direct_message(&ctx.http, message).await {
        Ok(_) => Ok("📬 Check your direct messages to continue linking.".to_string()),
        Err(e) => {
            tracing::debug!("Could not DM user {}: {}", user_id, e);
            Err(AppError::BadRequest(
                "I couldn't send you a DM. Enable direct messages from server members and try again."
                    .to_string(),
            ))
        }
    }
}
