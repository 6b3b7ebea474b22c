use crate::{data::voice_session::VoiceSessionRepository, model::voice_session::CreateVoiceSessionParams};
use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::create_voice_session};

mod create;
mod get_totals_since;
