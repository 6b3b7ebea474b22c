pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_server_config_table;
mod m20260301_000002_create_event_access_tables;
mod m20260301_000003_create_event_table;
mod m20260301_000004_create_rsvp_table;
mod m20260301_000005_create_voice_session_table;
mod m20260301_000006_create_bungie_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_server_config_table::Migration),
            Box::new(m20260301_000002_create_event_access_tables::Migration),
            Box::new(m20260301_000003_create_event_table::Migration),
            Box::new(m20260301_000004_create_rsvp_table::Migration),
            Box::new(m20260301_000005_create_voice_session_table::Migration),
            Box::new(m20260301_000006_create_bungie_tables::Migration),
        ]
    }
}
