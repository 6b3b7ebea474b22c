use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serenity::all::CreateMessage;

use crate::{
    bot::reply,
    error::{auth::AuthError, AppError},
    service::bungie::link::{AccountLinkService, OAuthRedirect},
    state::AppState,
};

/// Query parameters of the Bungie OAuth redirect.
///
/// # Fields
/// - `code` - Authorization code exchanged for tokens
/// - `state` - The state issued by `/link-bungie`, identifying the Discord user
#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

/// Completes an account link from the browser redirect.
///
/// The linked user is told by DM as well, since they started the flow in Discord. An
/// invalid or expired state never reaches a user and is answered in the browser only.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth = state.auth.as_deref().ok_or(AuthError::Disabled)?;
    let redirect = OAuthRedirect {
        code: params.code,
        state: params.state,
    };

    let result = AccountLinkService::new(&state.db, auth)
        .complete(&redirect, None, state.clock.now())
        .await;
    let notice = CreateMessage::new().content(reply::link_result(&result));
    let profile = result?;

    if let Err(e) = state.discord.send_dm(profile.discord_id, notice).await {
        tracing::debug!(
            "Could not DM link result to user {}: {}",
            profile.discord_id,
            e
        );
    }

    Ok((
        StatusCode::OK,
        format!(
            "Linked to {}. You can close this page and return to Discord.",
            profile.bungie_name
        ),
    ))
}
