//! Database repositories.
//!
//! Each repository borrows the connection, exposes one method per query and returns domain
//! models from `crate::model` rather than entity rows.

pub mod bungie_profile;
pub mod designated_channel;
pub mod event;
pub mod event_permission;
pub mod oauth_state;
pub mod pending_clan_invite;
pub mod ranking_roles;
pub mod rsvp;
pub mod server_config;
pub mod voice_session;

#[cfg(test)]
mod test;
