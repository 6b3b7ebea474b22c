//! Event factory for creating test event rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test events with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let event = EventFactory::new(&db)
///     .title("Vault of Glass")
///     .event_time(Utc::now() + Duration::minutes(15))
///     .message_id("555")
///     .build()
///     .await?;
/// ```
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    channel_id: String,
    creator_id: String,
    title: String,
    description: Option<String>,
    activity_type: String,
    max_attendees: i32,
    event_time: DateTime<Utc>,
    status: String,
    delete_message_after: Option<DateTime<Utc>>,
    message_id: Option<String>,
    thread_id: Option<String>,
    temp_role_id: Option<String>,
    voice_channel_id: Option<String>,
    reminder_sent: bool,
    confirmation_sent: bool,
    attendance_checked: bool,
}

impl<'a> EventFactory<'a> {
    /// Creates a factory with defaults.
    ///
    /// Defaults:
    /// - ids: unique values from `next_id`
    /// - title: `"Event {id}"`, activity type `"Raid"`, capacity 6
    /// - event_time: 1 day from now, status `"active"`
    /// - every optional id unset and every flag false
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: format!("{}", 10_000 + id),
            channel_id: format!("{}", 20_000 + id),
            creator_id: format!("{}", 30_000 + id),
            title: format!("Event {}", id),
            description: Some("Test event description".to_string()),
            activity_type: "Raid".to_string(),
            max_attendees: 6,
            event_time: Utc::now() + Duration::days(1),
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

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn creator_id(mut self, creator_id: impl Into<String>) -> Self {
        self.creator_id = creator_id.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn activity_type(mut self, activity_type: impl Into<String>) -> Self {
        self.activity_type = activity_type.into();
        self
    }

    pub fn max_attendees(mut self, max_attendees: i32) -> Self {
        self.max_attendees = max_attendees;
        self
    }

    pub fn event_time(mut self, event_time: DateTime<Utc>) -> Self {
        self.event_time = event_time;
        self
    }

    /// Sets the raw status string, e.g. `"cancelled"`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn delete_message_after(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.delete_message_after = at;
        self
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn temp_role_id(mut self, temp_role_id: impl Into<String>) -> Self {
        self.temp_role_id = Some(temp_role_id.into());
        self
    }

    pub fn voice_channel_id(mut self, voice_channel_id: impl Into<String>) -> Self {
        self.voice_channel_id = Some(voice_channel_id.into());
        self
    }

    pub fn reminder_sent(mut self, sent: bool) -> Self {
        self.reminder_sent = sent;
        self
    }

    pub fn confirmation_sent(mut self, sent: bool) -> Self {
        self.confirmation_sent = sent;
        self
    }

    pub fn attendance_checked(mut self, checked: bool) -> Self {
        self.attendance_checked = checked;
        self
    }

    /// Inserts the event row.
    ///
    /// # Returns
    /// - `Ok(entity::event::Model)` - Created event
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        entity::event::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            creator_id: ActiveValue::Set(self.creator_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            activity_type: ActiveValue::Set(self.activity_type),
            max_attendees: ActiveValue::Set(self.max_attendees),
            event_time: ActiveValue::Set(self.event_time),
            created_at: ActiveValue::Set(Utc::now()),
            status: ActiveValue::Set(self.status),
            delete_message_after: ActiveValue::Set(self.delete_message_after),
            message_id: ActiveValue::Set(self.message_id),
            thread_id: ActiveValue::Set(self.thread_id),
            temp_role_id: ActiveValue::Set(self.temp_role_id),
            voice_channel_id: ActiveValue::Set(self.voice_channel_id),
            reminder_sent: ActiveValue::Set(self.reminder_sent),
            confirmation_sent: ActiveValue::Set(self.confirmation_sent),
            attendance_checked: ActiveValue::Set(self.attendance_checked),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active event with default values.
pub async fn create_event(db: &DatabaseConnection) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db).build().await
}
