//! Factory methods for inserting test rows.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` shorthand for
//! the common case. Defaults use unique snowflake-like ids drawn from `helpers::next_id`
//! so factories never collide within a test binary.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let event = factory::event::EventFactory::new(&db)
//!     .guild_id("100")
//!     .max_attendees(2)
//!     .build()
//!     .await?;
//! let rsvp = factory::create_rsvp(&db, event.id, "42", "going").await?;
//! ```

pub mod bungie_profile;
pub mod event;
pub mod helpers;
pub mod rsvp;
pub mod server_config;
pub mod voice_session;

pub use bungie_profile::create_bungie_profile;
pub use event::create_event;
pub use rsvp::create_rsvp;
pub use server_config::create_server_config;
pub use voice_session::create_voice_session;
