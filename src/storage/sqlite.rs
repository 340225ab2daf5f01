//! SQLite key/value backend

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use super::{Persistence, decode, encode, migrations};
use crate::core::state::ProfileState;
use crate::error::Result;

/// Key the profile document is stored under.
pub const PROFILE_KEY: &str = "profileData";

/// Stores the profile document as one row of a key/value table.
pub struct SqliteStorage {
    conn: Connection,
    location: Option<PathBuf>,
    schema_version: u32,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("location", &self.location)
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

impl SqliteStorage {
    /// Open (or create) a database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::configure_pragmas(&conn)?;
        let schema_version = migrations::run_migrations(&conn)?;

        Ok(Self {
            conn,
            location: Some(path.to_path_buf()),
            schema_version,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let schema_version = migrations::run_migrations(&conn)?;
        Ok(Self {
            conn,
            location: None,
            schema_version,
        })
    }

    #[must_use]
    pub const fn schema_version(&self) -> u32 {
        self.schema_version
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;",
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl Persistence for SqliteStorage {
    fn save(&self, state: &ProfileState) -> Result<()> {
        let document = encode(state)?;
        self.put(PROFILE_KEY, &document)?;
        debug!(location = %self.describe(), bytes = document.len(), "saved profile");
        Ok(())
    }

    fn load(&self) -> Result<Option<ProfileState>> {
        Ok(self
            .get(PROFILE_KEY)?
            .and_then(|raw| decode(&raw, &self.describe())))
    }

    fn clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [PROFILE_KEY])?;
        Ok(())
    }

    fn describe(&self) -> String {
        match &self.location {
            Some(path) => format!("sqlite:{}", path.display()),
            None => "sqlite::memory:".to_string(),
        }
    }
}
