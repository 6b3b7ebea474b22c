use serenity::all::{Context, Interaction};

use crate::bot::{command, component, modal};

use super::Handler;

/// Routes an interaction to the command, button or modal handlers.
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(invocation) => {
            command::handle_command(handler, ctx, invocation).await
        }
        Interaction::Component(press) => component::handle_component(handler, ctx, press).await,
        Interaction::Modal(submission) => modal::handle_modal(handler, ctx, submission).await,
        _ => {}
    }
}
