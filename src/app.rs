//! Application context shared by CLI commands.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::config::{Config, StorageBackend};
use crate::error::Result;
use crate::storage::{JsonFileStorage, SqliteStorage};
use crate::store::SkillStore;

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub store: SkillStore,
    /// Emit JSON instead of human-readable text.
    pub json: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let mut config = Config::load(cli.config.as_deref(), &project_root)?;
        if let Some(data) = &cli.data {
            config.storage.path = Some(data.clone());
        }
        let store = open_store(&config)?;
        Ok(Self {
            config,
            store,
            json: cli.json,
        })
    }

    /// Context over an already opened store, with default configuration.
    #[must_use]
    pub fn with_store(store: SkillStore, json: bool) -> Self {
        Self {
            config: Config::default(),
            store,
            json,
        }
    }
}

/// Open the backend selected by `config` and load the store from it.
pub fn open_store(config: &Config) -> Result<SkillStore> {
    let path: PathBuf = config.storage.resolved_path()?;
    debug!(backend = ?config.storage.backend, path = %path.display(), "opening store");
    let store = match config.storage.backend {
        StorageBackend::Json => SkillStore::open(JsonFileStorage::new(path)),
        StorageBackend::Sqlite => SkillStore::open(SqliteStorage::open(&path)?),
    };
    Ok(store)
}
