use crate::{data::bungie_profile::BungieProfileRepository, model::bungie_profile::LinkedAccount};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::bungie_profile::BungieProfileFactory};

mod update_tokens;
mod upsert;
