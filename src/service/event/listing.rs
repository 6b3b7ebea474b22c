//! Upcoming events summary shared by `/event list` and the daily digest.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{event::EventRepository, rsvp::RsvpRepository},
    error::AppError,
    model::{event::Event, rsvp::Roster},
    util::time::{
        end_of_local_day_after, format_clock_time, format_day_month, start_of_local_day,
        weekday_short,
    },
};

/// Days after today shown with seat counts. Later events get a compact line.
const DETAILED_DAYS: i64 = 3;

pub const LISTING_HEADER: &str = "**Upcoming Events:**";

/// Renders the upcoming events of a guild.
///
/// Events from the start of today through the next three days are listed with their
/// weekday, time and open seats. Later events follow as compact `dd/mm - title` links.
///
/// # Returns
/// - `Ok(Some(String))` - Listing body, without header
/// - `Ok(None)` - The guild has no upcoming events
pub async fn build_listing(
    db: &DatabaseConnection,
    guild_id: u64,
    now: DateTime<Utc>,
) -> Result<Option<String>, AppError> {
    let event_repo = EventRepository::new(db);
    let rsvp_repo = RsvpRepository::new(db);

    let end_detailed = end_of_local_day_after(now, DETAILED_DAYS);
    let detailed = event_repo
        .get_upcoming_by_guild(guild_id, start_of_local_day(now), Some(end_detailed))
        .await?;
    let later = event_repo.get_later_by_guild(guild_id, end_detailed).await?;

    if detailed.is_empty() && later.is_empty() {
        return Ok(None);
    }

    let mut parts = Vec::new();

    if !detailed.is_empty() {
        parts.push(format!("**Next {} Days:**", DETAILED_DAYS));
        for event in &detailed {
            let roster = Roster::new(rsvp_repo.get_by_event(event.id).await?, event.capacity());
            parts.push(detailed_line(event, &roster));
        }
    }

    if !later.is_empty() {
        if parts.is_empty() {
            parts.push("**Future Events:**".to_string());
        } else {
            parts.push("\n**Future Events:**".to_string());
        }
        parts.extend(later.iter().map(compact_line));
    }

    Ok(Some(parts.join("\n")))
}

fn detailed_line(event: &Event, roster: &Roster) -> String {
    let open = roster.open_seats(event.capacity());
    let seats = match open {
        0 if roster.waitlist.is_empty() => "Full".to_string(),
        0 => format!("Full (Waitlist: {})", roster.waitlist.len()),
        1 => "1 spot".to_string(),
        n => format!("{} spots", n),
    };

    let text = format!(
        "{} - {}. {} at {} - {}",
        event.title,
        weekday_short(event.event_time),
        format_day_month(event.event_time),
        format_clock_time(event.event_time),
        seats
    );

    linked(text, event)
}

fn compact_line(event: &Event) -> String {
    linked(
        format!("{} - {}", format_day_month(event.event_time), event.title),
        event,
    )
}

/// Wraps text in a markdown link to the announcement once there is one.
fn linked(text: String, event: &Event) -> String {
    match event.message_link() {
        Some(link) => format!("[{}]({})", text, link),
        None => text,
    }
}
