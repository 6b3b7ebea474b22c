//! Application state shared across HTTP handlers.
//!
//! Initialized once during startup and cloned into each handler through axum's state
//! extraction. Every field is reference counted or a connection pool, so clones share
//! the underlying resources.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    service::{bungie::BungieAuth, gateway::DiscordGateway},
    util::clock::Clock,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Bot gateway, used to DM users the outcome of their account link.
    pub discord: Arc<dyn DiscordGateway>,
    /// `None` when the Bungie integration is disabled.
    pub auth: Option<Arc<dyn BungieAuth>>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        discord: Arc<dyn DiscordGateway>,
        auth: Option<Arc<dyn BungieAuth>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            db,
            discord,
            auth,
            clock,
        }
    }
}
