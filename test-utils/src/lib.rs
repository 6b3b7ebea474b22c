//! Clanbot Test Utils
//!
//! Shared helpers for the repository, service and scheduler tests of the clan bot. The crate
//! builds in-memory SQLite databases from the entity definitions and offers factories for
//! inserting rows with sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: fluent builder choosing which tables exist
//! - **TestContext**: the built environment holding the database connection
//! - **TestError**: failures during setup
//! - **factory**: row factories for events, RSVPs, configuration and linked profiles
//! - **fixture**: in-memory entity models that never touch the database
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn lists_going_users() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_event_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let event = test_utils::factory::create_event(db).await?;
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
