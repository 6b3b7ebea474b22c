use crate::data::ranking_roles::RankingRolesRepository;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod upsert;
