//! Business logic between the bot or scheduler and the repositories.
//!
//! Services borrow the database connection and reach Discord and Bungie only through the
//! `DiscordGateway` and `ClanApi` traits.

pub mod bungie;
pub mod clan;
pub mod event;
pub mod gateway;
pub mod inactivity;
pub mod permission;
pub mod ranking;
pub mod rsvp;
pub mod server_config;
pub mod voice;
