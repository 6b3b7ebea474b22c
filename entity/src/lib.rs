//! SeaORM entities for every table the bot persists.

pub mod prelude;

pub mod bungie_profile;
pub mod designated_event_channel;
pub mod event;
pub mod event_permission;
pub mod oauth_state;
pub mod pending_clan_invite;
pub mod ranking_roles;
pub mod rsvp;
pub mod server_config;
pub mod voice_session;
