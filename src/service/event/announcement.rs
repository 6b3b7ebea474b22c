//! Announcement message rendering.
//!
//! The event id travels in the embed footer, `Event ID: {id} | Type: {type}`, which is how
//! the persistent announcement buttons find their event.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateMessage,
    EditMessage,
};

use crate::{
    model::{
        activity::color_for_label,
        event::{Event, EventStatus},
        rsvp::{Roster, Rsvp},
    },
    util::time::{discord_timestamp, format_day_month},
};

pub const RSVP_GOING: &str = "rsvp_going";
pub const RSVP_NOT_GOING: &str = "rsvp_not_going";
pub const RSVP_MAYBE: &str = "rsvp_maybe";
pub const EVENT_EDIT: &str = "event_edit";
pub const EVENT_DELETE: &str = "event_delete";

const CANCELLED_COLOR: u32 = 0x992d22;
const COMPLETED_COLOR: u32 = 0x607d8b;

/// Longest title slice used in a temporary role name, keeping it under Discord's 100
/// character limit.
const ROLE_TITLE_MAX_CHARS: usize = 80;

const FOOTER_PREFIX: &str = "Event ID: ";

pub fn footer_text(event: &Event) -> String {
    format!("{}{} | Type: {}", FOOTER_PREFIX, event.id, event.activity_type)
}

/// Reads the event id back out of an announcement footer.
pub fn parse_event_id(footer: &str) -> Option<i32> {
    let rest = footer.trim().strip_prefix(FOOTER_PREFIX)?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();

    digits.parse().ok()
}

/// Name of the mentionable role created for an event, `Event: {title} - dd/mm`.
pub fn temp_role_name(event_title: &str, event_time: chrono::DateTime<chrono::Utc>) -> String {
    let title: String = event_title.chars().take(ROLE_TITLE_MAX_CHARS).collect();

    format!("Event: {} - {}", title, format_day_month(event_time))
}

/// Builds the announcement embed for the current state of the event.
pub fn build_embed(event: &Event, roster: &Roster) -> CreateEmbed {
    let (title, color) = match event.status {
        EventStatus::Cancelled | EventStatus::MessageDeletedCancelled => (
            format!("**[CANCELLED]** {}", event.title),
            CANCELLED_COLOR,
        ),
        EventStatus::Completed | EventStatus::MessageDeletedCompleted => (
            format!("**[COMPLETED]** {}", event.title),
            COMPLETED_COLOR,
        ),
        EventStatus::Active => (
            format!("**{}**", event.title),
            color_for_label(&event.activity_type),
        ),
    };

    let mut embed = CreateEmbed::new().title(title).color(color);

    if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
        embed = embed.description(description);
    }

    embed = embed
        .field("🗓️ Date and Time", discord_timestamp(event.event_time), false)
        .field(
            format!(
                "✅ Confirmed ({}/{})",
                roster.confirmed.len(),
                event.max_attendees
            ),
            mentions_or_nobody(&roster.confirmed),
            true,
        )
        .field(
            format!("🤔 Maybe ({})", roster.maybe.len()),
            mentions_or_nobody(&roster.maybe),
            true,
        );

    if !roster.waitlist.is_empty() {
        embed = embed.field(
            format!("⌛ Waitlist ({})", roster.waitlist.len()),
            mentions_or_nobody(&roster.waitlist),
            true,
        );
    }

    embed.footer(CreateEmbedFooter::new(footer_text(event)))
}

fn mentions_or_nobody(rsvps: &[Rsvp]) -> String {
    if rsvps.is_empty() {
        return "Nobody.".to_string();
    }

    rsvps
        .iter()
        .map(|r| format!("<@{}>", r.user_id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// RSVP and management buttons attached to active announcements.
pub fn components() -> Vec<CreateActionRow> {
    vec![
        CreateActionRow::Buttons(vec![
            CreateButton::new(RSVP_GOING)
                .label("Going")
                .emoji('✅')
                .style(ButtonStyle::Success),
            CreateButton::new(RSVP_NOT_GOING)
                .label("Not going")
                .emoji('❌')
                .style(ButtonStyle::Danger),
            CreateButton::new(RSVP_MAYBE)
                .label("Maybe")
                .emoji('🤔')
                .style(ButtonStyle::Secondary),
        ]),
        CreateActionRow::Buttons(vec![
            CreateButton::new(EVENT_EDIT)
                .label("Edit")
                .emoji('📝')
                .style(ButtonStyle::Primary),
            CreateButton::new(EVENT_DELETE)
                .label("Delete")
                .emoji('🗑')
                .style(ButtonStyle::Danger),
        ]),
    ]
}

/// First post of a newly created event.
pub fn create_message(event: &Event, roster: &Roster) -> CreateMessage {
    CreateMessage::new()
        .embed(build_embed(event, roster))
        .components(components())
}

/// Edit reflecting the current roster. Ended events lose their buttons.
pub fn edit_message(event: &Event, roster: &Roster) -> EditMessage {
    let components = if event.status == EventStatus::Active {
        components()
    } else {
        Vec::new()
    };

    EditMessage::new()
        .embed(build_embed(event, roster))
        .components(components)
}
