mod bungie_profile;
mod designated_channel;
mod event;
mod event_permission;
mod oauth_state;
mod pending_clan_invite;
mod ranking_roles;
mod rsvp;
mod server_config;
mod voice_session;
