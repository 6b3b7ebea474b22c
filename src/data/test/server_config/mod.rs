use crate::{data::server_config::ServerConfigRepository, model::server_config::ServerConfig};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::server_config::ServerConfigFactory};

mod get;
mod upsert;
