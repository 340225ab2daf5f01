use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::filter::DEFAULT_LEARNED_THRESHOLD;
use crate::error::{Result, SgError};
use crate::store::DEFAULT_INITIAL_PROFICIENCY;

/// Directory name used under the platform config/data dirs and the project root.
pub const APP_DIR: &str = "skillgraph";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit file (argument or `SKILLGRAPH_CONFIG`) replaces the
    /// global + project layering. Environment overrides apply last.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKILLGRAPH_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(SgError::MissingConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(project_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join(APP_DIR).join("config.toml"))
    }

    fn load_project(project_root: &Path) -> Result<Option<ConfigPatch>> {
        let path = project_root.join(format!(".{APP_DIR}")).join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SgError::Config(format!("read config {}: {err}", path.display())))?;
        Self::parse_patch(&raw)
            .map(Some)
            .map_err(|err| SgError::Config(format!("parse config {}: {err}", path.display())))
    }

    fn parse_patch(raw: &str) -> std::result::Result<ConfigPatch, toml::de::Error> {
        toml::from_str(raw)
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.storage {
            self.storage.merge(patch);
        }
        if let Some(patch) = patch.graph {
            self.graph.merge(patch);
        }
        if let Some(patch) = patch.convert {
            self.convert.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("SKILLGRAPH_STORAGE_BACKEND") {
            self.storage.backend = value.parse().map_err(SgError::Config)?;
        }
        if let Some(value) = lookup("SKILLGRAPH_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(value));
        }
        if let Some(value) = parse_env::<usize>("SKILLGRAPH_CRITICAL_LIMIT", lookup("SKILLGRAPH_CRITICAL_LIMIT"))? {
            self.graph.critical_limit = value;
        }
        if let Some(value) = parse_env::<u8>("SKILLGRAPH_LEARNED_THRESHOLD", lookup("SKILLGRAPH_LEARNED_THRESHOLD"))? {
            self.graph.learned_threshold = value;
        }
        if let Some(value) = parse_env::<u8>("SKILLGRAPH_INITIAL_PROFICIENCY", lookup("SKILLGRAPH_INITIAL_PROFICIENCY"))? {
            self.convert.initial_proficiency = value;
        }
        Ok(())
    }
}

/// Which [`crate::storage::Persistence`] backend to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

impl StorageBackend {
    #[must_use]
    pub const fn default_file_name(&self) -> &'static str {
        match self {
            Self::Json => "profile.json",
            Self::Sqlite => "skills.db",
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("invalid storage backend {other} (expected json|sqlite)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Data file; defaults to `<data_dir>/skillgraph/<backend file>`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    fn merge(&mut self, patch: StoragePatch) {
        if let Some(value) = patch.backend {
            self.backend = value;
        }
        if let Some(value) = patch.path {
            self.path = Some(value);
        }
    }

    /// Path the backend should open.
    pub fn resolved_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let dir = dirs::data_dir()
            .ok_or_else(|| SgError::MissingConfig("data directory not found".to_string()))?;
        Ok(dir.join(APP_DIR).join(self.backend.default_file_name()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// How many skills `sg graph critical` lists by default.
    #[serde(default = "default_critical_limit")]
    pub critical_limit: usize,
    /// Proficiency at which a skill counts as learned.
    #[serde(default = "default_learned_threshold")]
    pub learned_threshold: u8,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            critical_limit: default_critical_limit(),
            learned_threshold: default_learned_threshold(),
        }
    }
}

impl GraphConfig {
    fn merge(&mut self, patch: GraphPatch) {
        if let Some(value) = patch.critical_limit {
            self.critical_limit = value;
        }
        if let Some(value) = patch.learned_threshold {
            self.learned_threshold = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_initial_proficiency")]
    pub initial_proficiency: u8,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            initial_proficiency: default_initial_proficiency(),
        }
    }
}

impl ConvertConfig {
    fn merge(&mut self, patch: ConvertPatch) {
        if let Some(value) = patch.initial_proficiency {
            self.initial_proficiency = value;
        }
    }
}

const fn default_critical_limit() -> usize {
    5
}

const fn default_learned_threshold() -> u8 {
    DEFAULT_LEARNED_THRESHOLD
}

const fn default_initial_proficiency() -> u8 {
    DEFAULT_INITIAL_PROFICIENCY
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub storage: Option<StoragePatch>,
    pub graph: Option<GraphPatch>,
    pub convert: Option<ConvertPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoragePatch {
    pub backend: Option<StorageBackend>,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GraphPatch {
    pub critical_limit: Option<usize>,
    pub learned_threshold: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConvertPatch {
    pub initial_proficiency: Option<u8>,
}

fn parse_env<T>(key: &str, value: Option<String>) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|err| {
            SgError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}
