//! Domain models and operation parameter types.
//!
//! Repositories convert entity rows into these types at the data boundary, parsing stored
//! snowflakes into `u64` and status strings into enums.

pub mod activity;
pub mod bungie_profile;
pub mod clan_invite;
pub mod event;
pub mod oauth_state;
pub mod permission;
pub mod ranking;
pub mod rsvp;
pub mod server_config;
pub mod voice_session;
