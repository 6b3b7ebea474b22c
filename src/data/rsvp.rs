use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::rsvp::{AttendanceStatus, Rsvp, RsvpStatus},
    util::parse::parse_snowflake,
};

use entity::rsvp::Column;

/// One RSVP of a guild member together with when its event takes place.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildRsvpActivity {
    pub user_id: u64,
    pub attendance: AttendanceStatus,
    pub event_time: DateTime<Utc>,
}

pub struct RsvpRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RsvpRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a user's response to an event.
    pub async fn find(&self, event_id: i32, user_id: u64) -> Result<Option<Rsvp>, DbErr> {
        entity::prelude::Rsvp::find()
            .filter(Column::EventId.eq(event_id))
            .filter(Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?
            .map(Rsvp::from_entity)
            .transpose()
    }

    /// Inserts a first response with pending attendance.
    ///
    /// The (event, user) pair is unique, callers check `find` first.
    pub async fn create(
        &self,
        event_id: i32,
        user_id: u64,
        status: RsvpStatus,
        responded_at: DateTime<Utc>,
    ) -> Result<Rsvp, DbErr> {
        let entity = entity::rsvp::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id.to_string()),
            status: ActiveValue::Set(status.as_str().to_string()),
            responded_at: ActiveValue::Set(responded_at),
            attendance: ActiveValue::Set(AttendanceStatus::Pending.as_str().to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Rsvp::from_entity(entity)
    }

    /// Changes the status of an existing response and stamps `responded_at`.
    ///
    /// # Arguments
    /// - `reset_attendance` - Put attendance back to pending as well
    pub async fn update_status(
        &self,
        id: i32,
        status: RsvpStatus,
        responded_at: DateTime<Utc>,
        reset_attendance: bool,
    ) -> Result<Option<Rsvp>, DbErr> {
        let Some(existing) = entity::prelude::Rsvp::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::rsvp::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.responded_at = ActiveValue::Set(responded_at);
        if reset_attendance {
            active.attendance = ActiveValue::Set(AttendanceStatus::Pending.as_str().to_string());
        }

        let updated = active.update(self.db).await?;

        Rsvp::from_entity(updated).map(Some)
    }

    /// Deletes a user's response.
    ///
    /// # Returns
    /// - `Ok(true)` - A response was removed
    /// - `Ok(false)` - The user had not responded
    pub async fn delete(&self, event_id: i32, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Rsvp::delete_many()
            .filter(Column::EventId.eq(event_id))
            .filter(Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Every response to an event in first-come order.
    pub async fn get_by_event(&self, event_id: i32) -> Result<Vec<Rsvp>, DbErr> {
        entity::prelude::Rsvp::find()
            .filter(Column::EventId.eq(event_id))
            .order_by_asc(Column::RespondedAt)
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Rsvp::from_entity)
            .collect()
    }

    /// Records attendance for a user's response.
    pub async fn set_attendance(
        &self,
        event_id: i32,
        user_id: u64,
        attendance: AttendanceStatus,
    ) -> Result<(), DbErr> {
        entity::prelude::Rsvp::update_many()
            .col_expr(Column::Attendance, Expr::value(attendance.as_str()))
            .filter(Column::EventId.eq(event_id))
            .filter(Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Every response to events of a guild, paired with the event time.
    pub async fn get_activity_by_guild(&self, guild_id: u64) -> Result<Vec<GuildRsvpActivity>, DbErr> {
        let rows = entity::prelude::Rsvp::find()
            .find_also_related(entity::prelude::Event)
            .filter(entity::event::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        rows.into_iter()
            .filter_map(|(rsvp, event)| event.map(|event| (rsvp, event)))
            .map(|(rsvp, event)| {
                let attendance = AttendanceStatus::parse(&rsvp.attendance).ok_or_else(|| {
                    DbErr::Custom(format!("Failed to parse attendance: '{}'", rsvp.attendance))
                })?;

                Ok(GuildRsvpActivity {
                    user_id: parse_snowflake(&rsvp.user_id, "user_id")?,
                    attendance,
                    event_time: event.event_time,
                })
            })
            .collect()
    }
}
