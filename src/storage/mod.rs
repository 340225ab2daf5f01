//! Storage layer for skillgraph
//!
//! The store hands its whole [`ProfileState`] to a [`Persistence`] backend
//! after every successful mutation. Backends share one JSON document format
//! (see [`StoredState`]); they differ only in where the document lives.

pub mod json;
pub mod memory;
pub mod migrations;
pub mod sqlite;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::state::ProfileState;
use crate::error::Result;

pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Version written into every stored document.
pub const FORMAT_VERSION: &str = "1.0.0";

/// Durable home for the profile state.
pub trait Persistence: std::fmt::Debug {
    /// Replace the stored document with `state`.
    fn save(&self, state: &ProfileState) -> Result<()>;

    /// Load the stored document, `None` when nothing usable is stored.
    fn load(&self) -> Result<Option<ProfileState>>;

    /// Remove the stored document.
    fn clear(&self) -> Result<()>;

    /// Human-readable location, for logs and `sg graph stats`.
    fn describe(&self) -> String;
}

/// On-disk envelope around [`ProfileState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: ProfileState,
}

impl StoredState {
    #[must_use]
    pub fn wrap(state: &ProfileState) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            exported_at: Utc::now(),
            state: state.clone(),
        }
    }
}

/// Serialize `state` into the stored document format.
pub fn encode(state: &ProfileState) -> Result<String> {
    Ok(serde_json::to_string_pretty(&StoredState::wrap(state))?)
}

/// Parse a stored document. Invalid documents are logged and treated as absent.
#[must_use]
pub fn decode(raw: &str, origin: &str) -> Option<ProfileState> {
    match serde_json::from_str::<StoredState>(raw) {
        Ok(stored) => Some(stored.state),
        Err(err) => {
            warn!(origin, error = %err, "ignoring invalid stored profile document");
            None
        }
    }
}
