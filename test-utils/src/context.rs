use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Test context holding the in-memory SQLite connection.
///
/// The connection is opened lazily on first access and lives as long as the context, so
/// every table created through `with_tables` stays visible to the test body.
pub struct TestContext {
    /// Connection to the in-memory database, `None` until `database()` is called.
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    /// Creates an empty context with no connection yet.
    pub fn new() -> Self {
        Self { db: None }
    }

    /// Gets or opens the in-memory SQLite connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - The connection owned by this context
    /// - `Err(TestError::Database)` - Connecting failed
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;

                let db_ref = self.db.insert(db);

                Ok(&*db_ref)
            }
        }
    }

    /// Executes the given CREATE TABLE statements in order.
    ///
    /// Usually called by `TestBuilder::build()` rather than directly.
    ///
    /// # Arguments
    /// - `stmts` - Statements to execute
    ///
    /// # Returns
    /// - `Ok(())` - All tables created
    /// - `Err(TestError::Database)` - A statement failed
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
