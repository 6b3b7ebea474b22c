//! Approve and deny buttons of clan applications.

use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseFollowup,
    EditInteractionResponse,
};

use crate::{
    bot::{handler::Handler, reply},
    data::server_config::ServerConfigRepository,
    error::{auth::AuthError, AppError},
    service::clan::{ClanService, InviteResolution, INVITE_APPROVE_PREFIX, INVITE_DENY_PREFIX},
};

pub async fn resolve(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    approve: bool,
) {
    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await
    {
        tracing::error!("Failed to acknowledge clan request button: {}", e);
        return;
    }

    match apply(handler, ctx, component, approve).await {
        Ok(resolution) => {
            let edit = EditInteractionResponse::new()
                .embed(resolution.embed)
                .components(vec![]);
            if let Err(e) = component.edit_response(&ctx.http, edit).await {
                tracing::error!("Failed to update clan request message: {}", e);
            }
            let summary = CreateInteractionResponseFollowup::new().content(resolution.summary);
            if let Err(e) = component.create_followup(&ctx.http, summary).await {
                tracing::error!("Failed to post clan request summary: {}", e);
            }
        }
        Err(e) => {
            let followup = CreateInteractionResponseFollowup::new()
                .content(reply::outcome(Err(e)))
                .ephemeral(true);
            if let Err(e) = component.create_followup(&ctx.http, followup).await {
                tracing::error!("Failed to report clan request failure: {}", e);
            }
        }
    }
}

async fn apply(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
    approve: bool,
) -> Result<InviteResolution, AppError> {
    let clan = handler.clan.as_deref().ok_or(AuthError::Disabled)?;
    let guild_id = component.guild_id.ok_or_else(|| {
        AppError::BadRequest("Clan requests can only be handled inside a server.".to_string())
    })?;

    let prefix = if approve {
        INVITE_APPROVE_PREFIX
    } else {
        INVITE_DENY_PREFIX
    };
    let membership_id = component
        .data
        .custom_id
        .strip_prefix(prefix)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Unknown clan request.".to_string()))?;

    let config = ServerConfigRepository::new(&handler.db)
        .get_or_default(guild_id.get())
        .await?;
    let moderator = component
        .member
        .as_ref()
        .and_then(|m| m.nick.clone())
        .unwrap_or_else(|| component.user.display_name().to_string());

    let gateway = Handler::gateway(ctx);
    ClanService::new(&handler.db, &gateway, clan)
        .resolve_invite(&config, membership_id, approve, &moderator)
        .await
}
