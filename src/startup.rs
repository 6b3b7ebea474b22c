use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    error::AppError,
    service::bungie::{client::BungieClient, ClanApi},
    util::clock::Clock,
};

/// Connects to the SQLite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect or migrate
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for Bungie requests.
///
/// Redirects are disabled so token and platform calls never follow a redirect to another
/// host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(concat!("clanbot/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}

/// Creates the Bungie client when the integration is configured.
///
/// # Returns
/// - `Ok(Some(client))` - Integration enabled
/// - `Ok(None)` - Bungie variables missing, integration disabled
/// - `Err(AppError)` - Invalid OAuth endpoint configuration
pub fn setup_bungie_client(
    config: &Config,
    db: &DatabaseConnection,
    http_client: reqwest::Client,
    clock: Arc<dyn Clock>,
) -> Result<Option<Arc<BungieClient>>, AppError> {
    let Some(bungie) = config.bungie.clone() else {
        return Ok(None);
    };

    let client = BungieClient::new(bungie, db.clone(), http_client, clock)?;

    Ok(Some(Arc::new(client)))
}

/// Upcasts the concrete Bungie client for the scheduler and bot, which only need the
/// clan endpoints.
pub fn clan_api(client: &Option<Arc<BungieClient>>) -> Option<Arc<dyn ClanApi>> {
    client.clone().map(|c| c as Arc<dyn ClanApi>)
}
