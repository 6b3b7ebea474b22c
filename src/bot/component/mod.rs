//! Button handlers.
//!
//! - `event` - Announcement buttons and the delete confirmation
//! - `attendance` - Attendance confirmation DM
//! - `clan_invite` - Approve and deny buttons of clan applications

pub mod attendance;
pub mod clan_invite;
pub mod event;

use serenity::all::{ComponentInteraction, Context};

use crate::{
    scheduler::confirmation_reminder::{ATTEND_NO_PREFIX, ATTEND_YES_PREFIX},
    service::{
        clan::{INVITE_APPROVE_PREFIX, INVITE_DENY_PREFIX},
        event::announcement::{EVENT_DELETE, EVENT_EDIT, RSVP_GOING, RSVP_MAYBE, RSVP_NOT_GOING},
    },
};

use super::handler::Handler;

pub async fn handle_component(handler: &Handler, ctx: Context, component: ComponentInteraction) {
    let custom_id = component.data.custom_id.as_str();
    tracing::debug!("Button {} pressed by user {}", custom_id, component.user.id);

    match custom_id {
        RSVP_GOING | RSVP_NOT_GOING | RSVP_MAYBE => event::rsvp(handler, &ctx, &component).await,
        EVENT_EDIT => event::open_edit_modal(handler, &ctx, &component).await,
        EVENT_DELETE => event::confirm_delete(handler, &ctx, &component).await,
        id if id.starts_with(event::DELETE_CONFIRM_PREFIX) => {
            event::delete(handler, &ctx, &component).await
        }
        id if id.starts_with(event::DELETE_ABORT_PREFIX) => {
            event::abort_delete(&ctx, &component).await
        }
        id if id.starts_with(ATTEND_YES_PREFIX) => attendance::confirm(&ctx, &component).await,
        id if id.starts_with(ATTEND_NO_PREFIX) => {
            attendance::decline(handler, &ctx, &component).await
        }
        id if id.starts_with(INVITE_APPROVE_PREFIX) => {
            clan_invite::resolve(handler, &ctx, &component, true).await
        }
        id if id.starts_with(INVITE_DENY_PREFIX) => {
            clan_invite::resolve(handler, &ctx, &component, false).await
        }
        other => tracing::warn!("Unknown button {}", other),
    }
}
