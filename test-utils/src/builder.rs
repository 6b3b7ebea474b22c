use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for test contexts with a chosen set of tables.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{ServerConfig, RankingRoles};
///
/// let test = TestBuilder::new()
///     .with_table(ServerConfig)
///     .with_table(RankingRoles)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a builder with no tables.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table using SQLite syntax.
    ///
    /// Tables referenced by foreign keys must be added before the tables referencing them.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the event and RSVP tables.
    ///
    /// Enough for the event store, the RSVP ledger and the lifecycle jobs.
    pub fn with_event_tables(self) -> Self {
        self.with_table(Event).with_table(Rsvp)
    }

    /// Adds the guild configuration tables: server config, tier roles, designated
    /// channels and permission grants.
    pub fn with_config_tables(self) -> Self {
        self.with_table(ServerConfig)
            .with_table(RankingRoles)
            .with_table(DesignatedEventChannel)
            .with_table(EventPermission)
    }

    /// Adds the Bungie link tables: profiles, tracked invites and OAuth states.
    pub fn with_bungie_tables(self) -> Self {
        self.with_table(BungieProfile)
            .with_table(PendingClanInvite)
            .with_table(OauthState)
    }

    /// Adds every table of the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_config_tables()
            .with_event_tables()
            .with_table(VoiceSession)
            .with_bungie_tables()
    }

    /// Opens the in-memory database and creates the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with every table created
    /// - `Err(TestError::Database)` - Connecting or creating a table failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
