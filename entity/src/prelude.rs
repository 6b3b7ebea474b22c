pub use super::bungie_profile::Entity as BungieProfile;
pub use super::designated_event_channel::Entity as DesignatedEventChannel;
pub use super::event::Entity as Event;
pub use super::event_permission::Entity as EventPermission;
pub use super::oauth_state::Entity as OauthState;
pub use super::pending_clan_invite::Entity as PendingClanInvite;
pub use super::ranking_roles::Entity as RankingRoles;
pub use super::rsvp::Entity as Rsvp;
pub use super::server_config::Entity as ServerConfig;
pub use super::voice_session::Entity as VoiceSession;
