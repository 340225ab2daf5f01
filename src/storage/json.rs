//! Plain JSON file backend.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{Persistence, decode, encode};
use crate::core::state::ProfileState;
use crate::error::{Result, SgError};

/// Stores the profile document as a single JSON file.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so readers never see a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFileStorage {
    fn save(&self, state: &ProfileState) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let document = encode(state)?;
        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(document.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)
            .map_err(|err| SgError::Storage(format!("failed to persist {}: {err}", self.path.display())))?;

        debug!(path = %self.path.display(), bytes = document.len(), "saved profile");
        Ok(())
    }

    fn load(&self) -> Result<Option<ProfileState>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(decode(&raw, &self.describe())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
