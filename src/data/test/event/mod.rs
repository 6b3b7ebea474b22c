use crate::{
    data::event::EventRepository,
    model::event::{CreateEventParams, EventStatus, UpdateEventParams},
};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory::event::EventFactory};

mod create;
mod due_windows;
mod flags;
mod mark_message_deleted;
mod transition;
mod update_details;
