use crate::{
    data::rsvp::RsvpRepository,
    model::rsvp::{AttendanceStatus, RsvpStatus},
};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{create_event, create_rsvp, event::EventFactory, rsvp::RsvpFactory},
};

mod create;
mod delete;
mod get_activity_by_guild;
mod get_by_event;
mod update_status;
