//! Event store.
//!
//! Status transitions are single conditional updates filtered on the expected current
//! status. A transition that lost a race, or that was already applied, updates zero rows
//! and is reported as `Ok(None)` so callers skip its side effects.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::event::{CreateEventParams, Event, EventStatus, UpdateEventParams};

use entity::event::Column;

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new active event with every flag unset.
    ///
    /// # Returns
    /// - `Ok(Event)` - The stored event including its generated id
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateEventParams) -> Result<Event, DbErr> {
        let entity = entity::event::ActiveModel {
            guild_id: ActiveValue::Set(params.guild_id.to_string()),
            channel_id: ActiveValue::Set(params.channel_id.to_string()),
            creator_id: ActiveValue::Set(params.creator_id.to_string()),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            activity_type: ActiveValue::Set(params.activity_type),
            max_attendees: ActiveValue::Set(params.max_attendees),
            event_time: ActiveValue::Set(params.event_time),
            created_at: ActiveValue::Set(Utc::now()),
            status: ActiveValue::Set(EventStatus::Active.as_str().to_string()),
            delete_message_after: ActiveValue::Set(None),
            message_id: ActiveValue::Set(None),
            thread_id: ActiveValue::Set(None),
            temp_role_id: ActiveValue::Set(params.temp_role_id.map(|id| id.to_string())),
            voice_channel_id: ActiveValue::Set(None),
            reminder_sent: ActiveValue::Set(false),
            confirmation_sent: ActiveValue::Set(false),
            attendance_checked: ActiveValue::Set(false),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Event::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, DbErr> {
        entity::prelude::Event::find_by_id(id)
            .one(self.db)
            .await?
            .map(Event::from_entity)
            .transpose()
    }

    /// Finds the event announced by a given message.
    pub async fn find_by_message_id(&self, message_id: u64) -> Result<Option<Event>, DbErr> {
        entity::prelude::Event::find()
            .filter(Column::MessageId.eq(message_id.to_string()))
            .one(self.db)
            .await?
            .map(Event::from_entity)
            .transpose()
    }

    /// Replaces the editable details of an event that is still active.
    ///
    /// # Returns
    /// - `Ok(Some(Event))` - Updated event
    /// - `Ok(None)` - Event missing or no longer active
    pub async fn update_details(&self, params: UpdateEventParams) -> Result<Option<Event>, DbErr> {
        let result = entity::prelude::Event::update_many()
            .col_expr(Column::Title, Expr::value(params.title))
            .col_expr(Column::Description, Expr::value(params.description))
            .col_expr(Column::ActivityType, Expr::value(params.activity_type))
            .col_expr(Column::MaxAttendees, Expr::value(params.max_attendees))
            .col_expr(Column::EventTime, Expr::value(params.event_time))
            .filter(Column::Id.eq(params.id))
            .filter(Column::Status.eq(EventStatus::Active.as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(params.id).await
    }

    /// Moves an event from `from` to `to`, optionally scheduling the announcement removal.
    ///
    /// # Returns
    /// - `Ok(Some(Event))` - The transition was applied
    /// - `Ok(None)` - Illegal edge, event missing, or its status was no longer `from`
    pub async fn transition(
        &self,
        id: i32,
        from: EventStatus,
        to: EventStatus,
        delete_message_after: Option<DateTime<Utc>>,
    ) -> Result<Option<Event>, DbErr> {
        if !from.can_transition_to(to) {
            return Ok(None);
        }

        let mut update = entity::prelude::Event::update_many()
            .col_expr(Column::Status, Expr::value(to.as_str()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(from.as_str()));

        if let Some(at) = delete_message_after {
            update = update.col_expr(Column::DeleteMessageAfter, Expr::value(at));
        }

        let result = update.exec(self.db).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Moves an ended event to its terminal state and forgets the deleted announcement.
    pub async fn mark_message_deleted(&self, id: i32, from: EventStatus) -> Result<Option<Event>, DbErr> {
        let Some(to) = from.after_message_deleted() else {
            return Ok(None);
        };

        let result = entity::prelude::Event::update_many()
            .col_expr(Column::Status, Expr::value(to.as_str()))
            .col_expr(Column::MessageId, Expr::value(Option::<String>::None))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(from.as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    pub async fn set_message_id(&self, id: i32, message_id: u64) -> Result<(), DbErr> {
        self.set_column(id, Column::MessageId, Some(message_id)).await
    }

    pub async fn set_thread_id(&self, id: i32, thread_id: u64) -> Result<(), DbErr> {
        self.set_column(id, Column::ThreadId, Some(thread_id)).await
    }

    pub async fn set_voice_channel_id(&self, id: i32, channel_id: Option<u64>) -> Result<(), DbErr> {
        self.set_column(id, Column::VoiceChannelId, channel_id).await
    }

    pub async fn clear_temp_role_id(&self, id: i32) -> Result<(), DbErr> {
        self.set_column(id, Column::TempRoleId, None).await
    }

    async fn set_column(&self, id: i32, column: Column, value: Option<u64>) -> Result<(), DbErr> {
        entity::prelude::Event::update_many()
            .col_expr(column, Expr::value(value.map(|v| v.to_string())))
            .filter(Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Sets the 15 minute reminder flag.
    ///
    /// # Returns
    /// - `Ok(true)` - Flag went from false to true
    /// - `Ok(false)` - Flag was already set
    pub async fn mark_reminder_sent(&self, id: i32) -> Result<bool, DbErr> {
        self.set_flag(id, Column::ReminderSent).await
    }

    /// Sets the one hour confirmation flag.
    pub async fn mark_confirmation_sent(&self, id: i32) -> Result<bool, DbErr> {
        self.set_flag(id, Column::ConfirmationSent).await
    }

    /// Sets the attendance checked flag.
    pub async fn mark_attendance_checked(&self, id: i32) -> Result<bool, DbErr> {
        self.set_flag(id, Column::AttendanceChecked).await
    }

    async fn set_flag(&self, id: i32, column: Column) -> Result<bool, DbErr> {
        let result = entity::prelude::Event::update_many()
            .col_expr(column, Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(column.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Active events starting in `(lo, hi]` that have not been reminded yet.
    pub async fn get_due_reminders(
        &self,
        lo: DateTime<Utc>,
        hi: DateTime<Utc>,
    ) -> Result<Vec<Event>, DbErr> {
        self.active_query()
            .filter(Column::EventTime.gt(lo))
            .filter(Column::EventTime.lte(hi))
            .filter(Column::ReminderSent.eq(false))
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    /// Active events starting in `(lo, hi]` whose attendance prompt was not sent yet.
    pub async fn get_due_confirmations(
        &self,
        lo: DateTime<Utc>,
        hi: DateTime<Utc>,
    ) -> Result<Vec<Event>, DbErr> {
        self.active_query()
            .filter(Column::EventTime.gt(lo))
            .filter(Column::EventTime.lte(hi))
            .filter(Column::ConfirmationSent.eq(false))
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    /// Active events starting in `[lo, hi]` without a voice channel.
    pub async fn get_needing_voice_channel(
        &self,
        lo: DateTime<Utc>,
        hi: DateTime<Utc>,
    ) -> Result<Vec<Event>, DbErr> {
        self.active_query()
            .filter(Column::EventTime.between(lo, hi))
            .filter(Column::VoiceChannelId.is_null())
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    /// Active events that started in `[lo, hi]` and were not checked for attendance.
    pub async fn get_due_attendance_checks(
        &self,
        lo: DateTime<Utc>,
        hi: DateTime<Utc>,
    ) -> Result<Vec<Event>, DbErr> {
        self.active_query()
            .filter(Column::EventTime.between(lo, hi))
            .filter(Column::AttendanceChecked.eq(false))
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    /// Cancelled or completed events whose announcement is due for deletion.
    pub async fn get_due_message_deletions(&self, now: DateTime<Utc>) -> Result<Vec<Event>, DbErr> {
        entity::prelude::Event::find()
            .filter(Column::Status.is_in([
                EventStatus::Cancelled.as_str(),
                EventStatus::Completed.as_str(),
            ]))
            .filter(Column::DeleteMessageAfter.lte(now))
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    /// Active events that started before `cutoff`.
    pub async fn get_stale_active(&self, cutoff: DateTime<Utc>) -> Result<Vec<Event>, DbErr> {
        self.active_query()
            .filter(Column::EventTime.lt(cutoff))
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    /// Events of any status that started at or before `cutoff` and still have a voice
    /// channel recorded.
    pub async fn get_with_voice_channel_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Event>, DbErr> {
        entity::prelude::Event::find()
            .filter(Column::EventTime.lte(cutoff))
            .filter(Column::VoiceChannelId.is_not_null())
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    /// Active events of a guild starting at or after `from`, and at or before `to` when
    /// given, soonest first.
    pub async fn get_upcoming_by_guild(
        &self,
        guild_id: u64,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>, DbErr> {
        let mut query = self
            .active_query()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::EventTime.gte(from));

        if let Some(to) = to {
            query = query.filter(Column::EventTime.lte(to));
        }

        query
            .order_by_asc(Column::EventTime)
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    /// Active events of a guild starting strictly after `after`, soonest first.
    pub async fn get_later_by_guild(
        &self,
        guild_id: u64,
        after: DateTime<Utc>,
    ) -> Result<Vec<Event>, DbErr> {
        self.active_query()
            .filter(Column::GuildId.eq(guild_id.to_string()))
            .filter(Column::EventTime.gt(after))
            .order_by_asc(Column::EventTime)
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from_entity)
            .collect()
    }

    fn active_query(&self) -> sea_orm::Select<entity::prelude::Event> {
        entity::prelude::Event::find().filter(Column::Status.eq(EventStatus::Active.as_str()))
    }
}
