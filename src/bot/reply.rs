//! Reply text and builders shared by commands, components and modals.

use std::borrow::Borrow;

use serenity::all::{
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse, Member,
    User,
};

use crate::{
    error::AppError,
    model::{bungie_profile::BungieProfile, permission::Actor},
};

/// Immediate ephemeral text reply.
pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Deferred reply edit carrying the outcome of an action.
pub fn edit(result: Result<String, AppError>) -> EditInteractionResponse {
    EditInteractionResponse::new().content(outcome(result))
}

/// Text shown for a finished action.
///
/// Validation, permission and not-found errors are expected and logged at debug level.
/// Everything else is logged as an error and replaced with a generic sentence.
pub fn outcome(result: Result<String, AppError>) -> String {
    match result {
        Ok(content) => content,
        Err(e) => {
            match &e {
                AppError::BadRequest(_) | AppError::Forbidden(_) | AppError::NotFound(_) => {
                    tracing::debug!("Rejected interaction: {}", e)
                }
                _ => tracing::error!("Interaction failed: {}", e),
            }
            format!("❌ {}", e.user_message())
        }
    }
}

/// DM text for a completed or failed account link.
pub fn link_result(result: &Result<BungieProfile, AppError>) -> String {
    match result {
        Ok(profile) => format!(
            "✅ Your Discord account is now linked to **{}**.",
            profile.bungie_name
        ),
        Err(e) => {
            tracing::warn!("Bungie account link failed: {}", e);
            format!(
                "❌ Could not link your Bungie account: {}. Run /link-bungie to try again.",
                e.user_message()
            )
        }
    }
}

/// The permission facts of the member behind an interaction.
///
/// Outside a guild there is no member and the actor holds no roles. Command interactions
/// box their member while component and modal interactions do not, hence `Borrow`.
pub fn actor<M: Borrow<Member>>(user: &User, member: Option<&M>) -> Actor {
    let member = member.map(Borrow::borrow);

    Actor {
        user_id: user.id.get(),
        role_ids: member
            .map(|m| m.roles.iter().map(|r| r.get()).collect())
            .unwrap_or_default(),
        is_administrator: member
            .and_then(|m| m.permissions)
            .is_some_and(|p| p.administrator()),
    }
}
