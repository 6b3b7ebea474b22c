use crate::data::oauth_state::OauthStateRepository;
use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod consume;
