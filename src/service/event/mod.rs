//! Event lifecycle.
//!
//! `EventService` owns the transitions started by members (create, edit, cancel) and the
//! completion applied by the cleanup job, together with their Discord side effects.
//!
//! - `announcement` - Embed, buttons and footer of the announcement message
//! - `listing` - Upcoming events summary for `/event list` and the digest

pub mod announcement;
pub mod listing;

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::CreateMessage;

use crate::{
    data::{event::EventRepository, rsvp::RsvpRepository},
    error::AppError,
    model::{
        activity::ActivityType,
        event::{CreateEventParams, Event, EventStatus, UpdateEventParams},
        permission::{Actor, EventPermissionKind},
        rsvp::{Roster, RsvpStatus},
    },
    service::{gateway::DiscordGateway, permission::PermissionService},
    util::{clock::Clock, time::parse_event_time},
};

/// How long a cancelled announcement stays visible.
const CANCELLED_MESSAGE_TTL_HOURS: i64 = 1;
/// How long a completed announcement stays visible.
const COMPLETED_MESSAGE_TTL_HOURS: i64 = 24;

const MAX_CAPACITY: i32 = 100;
const MAX_TITLE_CHARS: usize = 100;

const THREAD_INTRO: &str =
    "Use this thread to discuss details, ask questions and find your fireteam for the event!";

/// Raw values of the create and edit modals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventInput {
    pub title: String,
    pub description: String,
    /// `HH:MM`, `DD/MM HH:MM` or `DD/MM/YYYY HH:MM`.
    pub time: String,
    /// Blank means the detected activity's default.
    pub capacity: String,
}

/// Modal input after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEventInput {
    pub title: String,
    pub description: Option<String>,
    pub activity: ActivityType,
    pub max_attendees: i32,
    pub event_time: DateTime<Utc>,
}

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
    discord: &'a dyn DiscordGateway,
    clock: &'a dyn Clock,
    /// Pause between consecutive DMs.
    dm_delay: StdDuration,
}

impl<'a> EventService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        discord: &'a dyn DiscordGateway,
        clock: &'a dyn Clock,
        dm_delay: StdDuration,
    ) -> Self {
        Self {
            db,
            discord,
            clock,
            dm_delay,
        }
    }

    /// Creates an event from the create modal.
    ///
    /// The temporary role and the discussion thread are best effort. A failed insert
    /// removes the role again. A failed announcement post is returned as an error with the
    /// event already stored.
    ///
    /// # Returns
    /// - `Ok(Event)` - Stored event with its message and thread ids
    /// - `Err(AppError::Forbidden)` - Actor may not create events, or the channel is not
    ///   designated for events
    /// - `Err(AppError::BadRequest)` - Invalid input
    pub async fn create(
        &self,
        guild_id: u64,
        channel_id: u64,
        actor: &Actor,
        input: &EventInput,
    ) -> Result<Event, AppError> {
        let permissions = PermissionService::new(self.db);
        if !permissions.can_create(guild_id, actor).await? {
            return Err(AppError::Forbidden(
                "You don't have permission to create events.".to_string(),
            ));
        }
        if !permissions.is_event_channel(guild_id, channel_id).await? {
            return Err(AppError::Forbidden(
                "Events can only be created in the designated event channels.".to_string(),
            ));
        }

        let valid = validate(input, self.clock.now())?;

        let role_name = announcement::temp_role_name(&valid.title, valid.event_time);
        let temp_role_id = match self
            .discord
            .create_role(guild_id, &role_name, 0, true)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Failed to create role '{}' in guild {}: {}", role_name, guild_id, e);
                None
            }
        };

        let repo = EventRepository::new(self.db);
        let created = repo
            .create(CreateEventParams {
                guild_id,
                channel_id,
                creator_id: actor.user_id,
                title: valid.title,
                description: valid.description,
                activity_type: valid.activity.as_str().to_string(),
                max_attendees: valid.max_attendees,
                event_time: valid.event_time,
                temp_role_id,
            })
            .await;

        let mut event = match created {
            Ok(event) => event,
            Err(e) => {
                if let Some(role_id) = temp_role_id {
                    if let Err(e) = self.discord.delete_role(guild_id, role_id).await {
                        tracing::warn!("Failed to roll back role {}: {}", role_id, e);
                    }
                }
                return Err(e.into());
            }
        };

        let message_id = self
            .discord
            .send_message(
                channel_id,
                announcement::create_message(&event, &Roster::default()),
            )
            .await?;
        repo.set_message_id(event.id, message_id).await?;
        event.message_id = Some(message_id);

        match self.open_thread(&event, message_id).await {
            Ok(thread_id) => event.thread_id = Some(thread_id),
            Err(e) => tracing::warn!("Failed to open thread for event {}: {}", event.id, e),
        }

        tracing::info!(
            "User {} created event {} '{}' in guild {}",
            actor.user_id,
            event.id,
            event.title,
            guild_id
        );

        Ok(event)
    }

    async fn open_thread(&self, event: &Event, message_id: u64) -> Result<u64, AppError> {
        let thread_id = self
            .discord
            .create_thread(event.channel_id, message_id, &event.title)
            .await?;
        EventRepository::new(self.db)
            .set_thread_id(event.id, thread_id)
            .await?;
        self.discord
            .send_message(thread_id, CreateMessage::new().content(THREAD_INTRO))
            .await?;

        Ok(thread_id)
    }

    /// Loads an event and checks the actor may perform `permission` on it.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No such event
    /// - `Err(AppError::Forbidden)` - Actor lacks the permission
    pub async fn authorize(
        &self,
        event_id: i32,
        actor: &Actor,
        permission: EventPermissionKind,
    ) -> Result<Event, AppError> {
        let event = EventRepository::new(self.db)
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found.", event_id)))?;

        PermissionService::new(self.db)
            .require_manage(&event, actor, permission)
            .await?;

        Ok(event)
    }

    /// Applies the edit modal to an active event and refreshes its announcement.
    ///
    /// # Returns
    /// - `Ok(Event)` - Updated event
    /// - `Err(AppError::BadRequest)` - Invalid input, or the event is no longer active
    pub async fn edit(
        &self,
        event_id: i32,
        actor: &Actor,
        input: &EventInput,
    ) -> Result<Event, AppError> {
        self.authorize(event_id, actor, EventPermissionKind::EditAnyEvent)
            .await?;
        let valid = validate(input, self.clock.now())?;

        let event = EventRepository::new(self.db)
            .update_details(UpdateEventParams {
                id: event_id,
                title: valid.title,
                description: valid.description,
                activity_type: valid.activity.as_str().to_string(),
                max_attendees: valid.max_attendees,
                event_time: valid.event_time,
            })
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("Only active events can be edited.".to_string())
            })?;

        self.refresh_announcement(&event).await?;

        tracing::info!("User {} edited event {}", actor.user_id, event_id);

        Ok(event)
    }

    /// Cancels an event on behalf of a member.
    ///
    /// # Returns
    /// - `Ok(Some(Event))` - Event cancelled
    /// - `Ok(None)` - Event had already ended
    /// - `Err(AppError::Forbidden)` - Actor may not delete this event
    pub async fn cancel(&self, event_id: i32, actor: &Actor) -> Result<Option<Event>, AppError> {
        let event = self
            .authorize(event_id, actor, EventPermissionKind::DeleteAnyEvent)
            .await?;

        let cancelled = self.cancel_event(&event).await?;
        if cancelled.is_some() {
            tracing::info!("User {} cancelled event {}", actor.user_id, event_id);
        }

        Ok(cancelled)
    }

    /// Moves an active event to `cancelled`.
    ///
    /// Going users are told by DM, the temporary role is deleted and the announcement is
    /// marked, then removed an hour later by the message deletion job.
    pub async fn cancel_event(&self, event: &Event) -> Result<Option<Event>, AppError> {
        let now = self.clock.now();
        let Some(cancelled) = EventRepository::new(self.db)
            .transition(
                event.id,
                EventStatus::Active,
                EventStatus::Cancelled,
                Some(now + Duration::hours(CANCELLED_MESSAGE_TTL_HOURS)),
            )
            .await?
        else {
            return Ok(None);
        };

        let roster = self.roster(&cancelled).await?;
        let notice = format!(
            "ℹ️ The event **'{}'** you signed up for was cancelled.",
            cancelled.title
        );
        for (i, user_id) in roster.going_user_ids().into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.dm_delay).await;
            }
            if let Err(e) = self
                .discord
                .send_dm(user_id, CreateMessage::new().content(&notice))
                .await
            {
                tracing::warn!("Failed to DM cancellation to {}: {}", user_id, e);
            }
        }

        self.release_temp_role(&cancelled).await?;
        self.update_announcement(&cancelled, &roster).await;

        Ok(Some(cancelled))
    }

    /// Moves an active event that is over to `completed`.
    pub async fn complete_event(&self, event: &Event) -> Result<Option<Event>, AppError> {
        let now = self.clock.now();
        let Some(completed) = EventRepository::new(self.db)
            .transition(
                event.id,
                EventStatus::Active,
                EventStatus::Completed,
                Some(now + Duration::hours(COMPLETED_MESSAGE_TTL_HOURS)),
            )
            .await?
        else {
            return Ok(None);
        };

        let roster = self.roster(&completed).await?;
        self.update_announcement(&completed, &roster).await;
        self.release_temp_role(&completed).await?;

        Ok(Some(completed))
    }

    /// Re-renders the announcement from the stored event and roster.
    pub async fn refresh_announcement(&self, event: &Event) -> Result<(), AppError> {
        let roster = self.roster(event).await?;
        self.update_announcement(event, &roster).await;

        Ok(())
    }

    /// Gives the temporary role to a user who answered going and takes it from anyone
    /// else. Best effort.
    pub async fn sync_temp_role(&self, event: &Event, user_id: u64, status: RsvpStatus) {
        let Some(role_id) = event.temp_role_id else {
            return;
        };

        let result = if status == RsvpStatus::Going {
            self.discord.add_role(event.guild_id, user_id, role_id).await
        } else {
            self.discord
                .remove_role(event.guild_id, user_id, role_id)
                .await
        };

        if let Err(e) = result {
            tracing::warn!(
                "Failed to update role {} of user {} for event {}: {}",
                role_id,
                user_id,
                event.id,
                e
            );
        }
    }

    async fn update_announcement(&self, event: &Event, roster: &Roster) {
        let Some(message_id) = event.message_id else {
            return;
        };

        if let Err(e) = self
            .discord
            .edit_message(
                event.channel_id,
                message_id,
                announcement::edit_message(event, roster),
            )
            .await
        {
            tracing::warn!(
                "Failed to update announcement {} of event {}: {}",
                message_id,
                event.id,
                e
            );
        }
    }

    /// Deletes the temporary role, tolerating one that is already gone, and forgets it.
    async fn release_temp_role(&self, event: &Event) -> Result<(), AppError> {
        let Some(role_id) = event.temp_role_id else {
            return Ok(());
        };

        match self.discord.delete_role(event.guild_id, role_id).await {
            Ok(()) => {}
            Err(e) if e.is_missing_or_forbidden() => {
                tracing::debug!("Role {} of event {} already gone: {}", role_id, event.id, e)
            }
            Err(e) => tracing::warn!("Failed to delete role {} of event {}: {}", role_id, event.id, e),
        }

        EventRepository::new(self.db)
            .clear_temp_role_id(event.id)
            .await?;

        Ok(())
    }

    async fn roster(&self, event: &Event) -> Result<Roster, AppError> {
        let rsvps = RsvpRepository::new(self.db).get_by_event(event.id).await?;

        Ok(Roster::new(rsvps, event.capacity()))
    }
}

/// Validates modal input.
///
/// # Returns
/// - `Ok(ValidEventInput)` - Title present, capacity in `1..=100`, time in the future
/// - `Err(AppError::BadRequest)` - Message describing the first invalid field
pub fn validate(input: &EventInput, now: DateTime<Utc>) -> Result<ValidEventInput, AppError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("The title cannot be empty.".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::BadRequest(format!(
            "The title can be at most {} characters.",
            MAX_TITLE_CHARS
        )));
    }

    let description = Some(input.description.trim().to_string()).filter(|d| !d.is_empty());
    let activity = ActivityType::detect(title, description.as_deref());

    let capacity = input.capacity.trim();
    let max_attendees = if capacity.is_empty() {
        activity.default_capacity()
    } else {
        capacity
            .parse::<i32>()
            .ok()
            .filter(|c| (1..=MAX_CAPACITY).contains(c))
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Capacity must be a number between 1 and {}.",
                    MAX_CAPACITY
                ))
            })?
    };

    let event_time = parse_event_time(&input.time, now)?;
    if event_time <= now {
        return Err(AppError::BadRequest(
            "The event time must be in the future.".to_string(),
        ));
    }

    Ok(ValidEventInput {
        title: title.to_string(),
        description,
        activity,
        max_attendees,
        event_time,
    })
}

/// Prefills the edit modal from a stored event.
pub fn input_from_event(event: &Event) -> EventInput {
    EventInput {
        title: event.title.clone(),
        description: event.description.clone().unwrap_or_default(),
        time: crate::util::time::format_for_input(event.event_time),
        capacity: event.max_attendees.to_string(),
    }
}
