//! Shared setup for commands: config, store, backend client

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pearl::api::ApiClient;
use pearl::auth::AuthSession;
use pearl::config::Config;
use pearl::lives::LifeRegen;
use pearl::store::{KvStore, MemoryStore, Persistence, SqliteStore};
use pearl::sync::ProgressSync;
use pearl::taiken::TaikenSession;

pub type SharedStore = Arc<dyn KvStore>;

pub struct AppContext {
    pub config: Config,
    pub persistence: Persistence<SharedStore>,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>, db_override: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load_from(config_path)?;
        if let Some(db) = db_override {
            config.storage.db_path = Some(db);
        }

        let db_path = config.db_path();
        let store: SharedStore = match SqliteStore::open(&db_path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!(
                    "Failed to open {}: {}. Progress will not be saved.",
                    db_path.display(),
                    e
                );
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self {
            config,
            persistence: Persistence::new(store),
        })
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config.api)
    }

    pub fn auth(&self) -> AuthSession<SharedStore> {
        AuthSession::restore(self.client(), self.persistence.clone())
    }

    /// Sync uses the signed-in client so events carry the user's token
    pub fn sync(&self) -> ProgressSync {
        if self.config.api.sync_enabled {
            ProgressSync::new(self.auth().client().clone())
        } else {
            ProgressSync::disabled()
        }
    }

    pub fn story(&self) -> TaikenSession<SharedStore> {
        TaikenSession::open(
            self.persistence.clone(),
            LifeRegen::new(self.config.life_regen_interval()),
            self.sync(),
        )
    }
}
