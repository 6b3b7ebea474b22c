//! Event fixtures.

use chrono::{TimeZone, Utc};
use entity::event;

/// Default guild id used by the fixture.
pub const DEFAULT_GUILD_ID: &str = "111111111111111111";

/// Default announcement channel id used by the fixture.
pub const DEFAULT_CHANNEL_ID: &str = "222222222222222222";

/// Default creator id used by the fixture.
pub const DEFAULT_CREATOR_ID: &str = "333333333333333333";

/// Creates an active raid event scheduled for 2026-03-14 21:00 UTC.
///
/// No message, thread, role or voice channel has been created yet and every flag is
/// false.
pub fn entity() -> event::Model {
    let event_time = Utc.with_ymd_and_hms(2026, 3, 14, 21, 0, 0).unwrap();

    event::Model {
        id: 1,
        guild_id: DEFAULT_GUILD_ID.to_string(),
        channel_id: DEFAULT_CHANNEL_ID.to_string(),
        creator_id: DEFAULT_CREATOR_ID.to_string(),
        title: "Vault of Glass".to_string(),
        description: Some("Bring relics".to_string()),
        activity_type: "Raid".to_string(),
        max_attendees: 6,
        event_time,
        created_at: event_time - chrono::Duration::days(2),
        status: "active".to_string(),
        delete_message_after: None,
        message_id: None,
        thread_id: None,
        temp_role_id: None,
        voice_channel_id: None,
        reminder_sent: false,
        confirmation_sent: false,
        attendance_checked: false,
    }
}
