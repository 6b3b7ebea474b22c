//! RSVP ledger.
//!
//! One response per (event, user). Writes are idempotent: answering with the current
//! status again leaves the row and its timestamp untouched, which keeps first-come
//! precedence stable.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::{event::EventRepository, rsvp::RsvpRepository},
    error::AppError,
    model::{
        event::{Event, EventStatus},
        permission::{Actor, EventPermissionKind},
        rsvp::{Roster, Rsvp, RsvpSource, RsvpStatus},
    },
    service::permission::PermissionService,
};

/// Result of `set_status`.
#[derive(Debug, Clone, PartialEq)]
pub struct RsvpUpdate {
    pub rsvp: Rsvp,
    /// False when the user already had this status.
    pub changed: bool,
}

/// What a manager does to someone else's RSVP through `/event rsvp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpAction {
    Set(RsvpStatus),
    Remove,
}

impl RsvpAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "remove" => Some(Self::Remove),
            other => RsvpStatus::parse(other).map(Self::Set),
        }
    }
}

pub struct RsvpService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RsvpService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a user's answer.
    ///
    /// A changed status stamps `responded_at = now`. When the user changes their own
    /// answer, attendance goes back to pending. A manager change keeps it.
    pub async fn set_status(
        &self,
        event_id: i32,
        user_id: u64,
        status: RsvpStatus,
        source: RsvpSource,
        now: DateTime<Utc>,
    ) -> Result<RsvpUpdate, AppError> {
        let repo = RsvpRepository::new(self.db);

        let Some(existing) = repo.find(event_id, user_id).await? else {
            let rsvp = repo.create(event_id, user_id, status, now).await?;
            return Ok(RsvpUpdate {
                rsvp,
                changed: true,
            });
        };

        if existing.status == status {
            return Ok(RsvpUpdate {
                rsvp: existing,
                changed: false,
            });
        }

        let rsvp = repo
            .update_status(existing.id, status, now, source == RsvpSource::User)
            .await?
            .ok_or_else(|| AppError::NotFound("RSVP disappeared while updating".to_string()))?;

        Ok(RsvpUpdate {
            rsvp,
            changed: true,
        })
    }

    /// Deletes a user's answer.
    pub async fn remove(&self, event_id: i32, user_id: u64) -> Result<bool, AppError> {
        Ok(RsvpRepository::new(self.db).delete(event_id, user_id).await?)
    }

    /// Answers of an event grouped by the capacity policy.
    pub async fn list(&self, event: &Event) -> Result<Roster, AppError> {
        let rsvps = RsvpRepository::new(self.db).get_by_event(event.id).await?;

        Ok(Roster::new(rsvps, event.capacity()))
    }

    /// Self-service answer from the announcement buttons or the attendance prompt.
    ///
    /// # Returns
    /// - `Ok((Event, RsvpUpdate))` - Answer stored
    /// - `Err(AppError::NotFound)` - Event does not exist
    /// - `Err(AppError::BadRequest)` - Event no longer active, or `waitlisted` requested
    pub async fn respond(
        &self,
        event_id: i32,
        user_id: u64,
        status: RsvpStatus,
        now: DateTime<Utc>,
    ) -> Result<(Event, RsvpUpdate), AppError> {
        if status == RsvpStatus::Waitlisted {
            return Err(AppError::BadRequest(
                "Only event managers can place someone on the waitlist.".to_string(),
            ));
        }

        let event = self.active_event(event_id).await?;
        let update = self
            .set_status(event_id, user_id, status, RsvpSource::User, now)
            .await?;

        Ok((event, update))
    }

    /// Manager override of another user's answer.
    ///
    /// # Returns
    /// - `Ok(Event)` - Override applied, the event for refreshing its announcement
    /// - `Err(AppError::Forbidden)` - Actor may not manage RSVPs of this event
    /// - `Err(AppError::BadRequest)` - Event no longer active
    pub async fn manage(
        &self,
        event_id: i32,
        actor: &Actor,
        target_user_id: u64,
        action: RsvpAction,
        now: DateTime<Utc>,
    ) -> Result<Event, AppError> {
        let event = self.active_event(event_id).await?;

        PermissionService::new(self.db)
            .require_manage(&event, actor, EventPermissionKind::ManageAnyRsvp)
            .await?;

        match action {
            RsvpAction::Set(status) => {
                self.set_status(event_id, target_user_id, status, RsvpSource::Manager, now)
                    .await?;
            }
            RsvpAction::Remove => {
                self.remove(event_id, target_user_id).await?;
            }
        }

        tracing::info!(
            "User {} set RSVP of {} on event {} to {:?}",
            actor.user_id,
            target_user_id,
            event_id,
            action
        );

        Ok(event)
    }

    async fn active_event(&self, event_id: i32) -> Result<Event, AppError> {
        let event = EventRepository::new(self.db)
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found.", event_id)))?;

        if event.status != EventStatus::Active {
            return Err(AppError::BadRequest(
                "This event is no longer accepting responses.".to_string(),
            ));
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rsvp::AttendanceStatus;
    use chrono::{Duration, TimeZone};
    use sea_orm::DbErr;
    use test_utils::{builder::TestBuilder, factory::event::EventFactory};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    /// Tests answering twice with the same status.
    ///
    /// Expected: Second call reports unchanged and keeps the first timestamp
    #[tokio::test]
    async fn same_status_keeps_timestamp() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_event_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let event = test_utils::factory::create_event(db).await?;
        let service = RsvpService::new(db);

        let first = service
            .set_status(event.id, 7, RsvpStatus::Going, RsvpSource::User, t0())
            .await
            .unwrap();
        let second = service
            .set_status(
                event.id,
                7,
                RsvpStatus::Going,
                RsvpSource::User,
                t0() + Duration::hours(1),
            )
            .await
            .unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(second.rsvp.responded_at, t0());
        assert_eq!(second.rsvp.id, first.rsvp.id);

        Ok(())
    }

    /// Tests that a user's own change resets attendance while a manager change keeps it.
    ///
    /// Expected: Pending after user change, attended preserved after manager change
    #[tokio::test]
    async fn attendance_reset_depends_on_source() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_event_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let event = test_utils::factory::create_event(db).await?;
        let service = RsvpService::new(db);
        let repo = RsvpRepository::new(db);

        service
            .set_status(event.id, 7, RsvpStatus::Going, RsvpSource::User, t0())
            .await
            .unwrap();
        repo.set_attendance(event.id, 7, AttendanceStatus::Attended)
            .await?;

        let managed = service
            .set_status(event.id, 7, RsvpStatus::Maybe, RsvpSource::Manager, t0())
            .await
            .unwrap();
        assert_eq!(managed.rsvp.attendance, AttendanceStatus::Attended);

        let own = service
            .set_status(event.id, 7, RsvpStatus::Going, RsvpSource::User, t0())
            .await
            .unwrap();
        assert_eq!(own.rsvp.attendance, AttendanceStatus::Pending);

        Ok(())
    }

    /// Tests the capacity scenario of 8 going users on a 6 seat event.
    ///
    /// Expected: First six confirmed, last two in the waitlist
    #[tokio::test]
    async fn list_applies_capacity() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_event_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let entity = EventFactory::new(db).max_attendees(6).build().await?;
        let event = Event::from_entity(entity)?;
        let service = RsvpService::new(db);

        for user in 1..=8u64 {
            service
                .set_status(
                    event.id,
                    user,
                    RsvpStatus::Going,
                    RsvpSource::User,
                    t0() + Duration::seconds(user as i64),
                )
                .await
                .unwrap();
        }

        let roster = service.list(&event).await.unwrap();

        assert_eq!(roster.confirmed.len(), 6);
        let waitlist: Vec<u64> = roster.waitlist.iter().map(|r| r.user_id).collect();
        assert_eq!(waitlist, vec![7, 8]);

        Ok(())
    }

    /// Tests that users cannot waitlist themselves or answer ended events.
    ///
    /// Expected: Err(BadRequest) for both
    #[tokio::test]
    async fn respond_rejects_waitlist_and_ended_events() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_event_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let active = test_utils::factory::create_event(db).await?;
        let ended = EventFactory::new(db).status("cancelled").build().await?;
        let service = RsvpService::new(db);

        assert!(matches!(
            service
                .respond(active.id, 7, RsvpStatus::Waitlisted, t0())
                .await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.respond(ended.id, 7, RsvpStatus::Going, t0()).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(service
            .respond(active.id, 7, RsvpStatus::Maybe, t0())
            .await
            .is_ok());

        Ok(())
    }

    /// Tests manager override by the creator and by a stranger.
    ///
    /// Expected: Creator can waitlist and remove, stranger is forbidden
    #[tokio::test]
    async fn manage_requires_permission() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_config_tables()
            .with_event_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let event = EventFactory::new(db).creator_id("10").build().await?;
        let service = RsvpService::new(db);
        let creator = Actor {
            user_id: 10,
            ..Default::default()
        };
        let stranger = Actor {
            user_id: 11,
            ..Default::default()
        };

        service
            .manage(event.id, &creator, 20, RsvpAction::Set(RsvpStatus::Waitlisted), t0())
            .await
            .unwrap();
        let stored = RsvpRepository::new(db).find(event.id, 20).await?.unwrap();
        assert_eq!(stored.status, RsvpStatus::Waitlisted);

        assert!(matches!(
            service
                .manage(event.id, &stranger, 20, RsvpAction::Remove, t0())
                .await,
            Err(AppError::Forbidden(_))
        ));

        service
            .manage(event.id, &creator, 20, RsvpAction::Remove, t0())
            .await
            .unwrap();
        assert!(RsvpRepository::new(db).find(event.id, 20).await?.is_none());

        Ok(())
    }

    #[test]
    fn parses_manager_actions() {
        assert_eq!(RsvpAction::parse("remove"), Some(RsvpAction::Remove));
        assert_eq!(
            RsvpAction::parse("waitlisted"),
            Some(RsvpAction::Set(RsvpStatus::Waitlisted))
        );
        assert_eq!(RsvpAction::parse("later"), None);
    }
}
