//! Server State
//!
//! Holds the configuration and the sales store handle shared by every
//! handler. Services are cheap and constructed per-request from the
//! store handle.

use std::sync::Arc;

use crate::core::Config;
use crate::db::{MemorySalesStore, RemoteSalesStore, SalesStore};
use shared::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<dyn SalesStore>,
}

impl ServerState {
    /// Connect the configured store and assemble the state
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let store: Arc<dyn SalesStore> = match &config.database_url {
            Some(url) => {
                tracing::info!(%url, "Connecting to sales store");
                Arc::new(
                    RemoteSalesStore::connect(url, &config.database_ns, &config.database_db)
                        .await?,
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory sales store");
                Arc::new(MemorySalesStore::new(config.organization_id.clone()))
            }
        };

        Ok(Self {
            config: Arc::new(config.clone()),
            store,
        })
    }

    /// Assemble state around an existing store (used by tests)
    pub fn with_store(config: Config, store: Arc<dyn SalesStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
