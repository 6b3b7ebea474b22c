use crate::data::designated_channel::DesignatedChannelRepository;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod add_remove;
