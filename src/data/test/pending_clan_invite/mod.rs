use crate::{
    data::pending_clan_invite::PendingClanInviteRepository,
    model::clan_invite::PendingClanInvite,
};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod track;
