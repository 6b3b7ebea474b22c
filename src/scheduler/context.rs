use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::{
    service::{bungie::ClanApi, gateway::DiscordGateway},
    util::clock::Clock,
};

/// Dependencies handed to every scheduled job.
#[derive(Clone)]
pub struct JobContext {
    pub db: DatabaseConnection,
    pub discord: Arc<dyn DiscordGateway>,
    pub clock: Arc<dyn Clock>,
    /// `None` when the Bungie integration is disabled.
    pub clan: Option<Arc<dyn ClanApi>>,
    /// Base pause between consecutive DMs.
    pub dm_delay: Duration,
}

impl JobContext {
    /// Pause between event reminder and confirmation DMs.
    pub fn reminder_delay(&self) -> Duration {
        self.dm_delay * 2
    }

    /// Pause between clan application posts.
    pub fn post_delay(&self) -> Duration {
        self.dm_delay * 2
    }

    pub fn clan(&self) -> Option<&dyn ClanApi> {
        self.clan.as_deref()
    }
}
