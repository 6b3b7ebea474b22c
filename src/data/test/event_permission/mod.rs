use crate::{
    data::event_permission::EventPermissionRepository, model::permission::EventPermissionKind,
};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod any_role_has;
mod grant_revoke;
