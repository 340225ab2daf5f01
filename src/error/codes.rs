//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Skill and graph errors
//! - 3xx: Config errors
//! - 6xx: Storage errors
//! - 8xx: Validation errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for `--json` output.
///
/// Each variant maps to a numeric code (e.g., `SkillNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Skill errors (1xx)
    // ========================================
    /// E101: Requested skill was not found
    SkillNotFound,
    /// E102: A dependency edge would close a cycle
    SkillCyclicDependency,
    /// E103: Referenced dependency edge does not exist
    DependencyNotFound,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,
    /// E304: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E601: Reading or writing the state backend failed
    StorageError,
    /// E604: SQLite backend error
    DatabaseError,
    /// E605: State document could not be (de)serialized
    SerializationError,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: User input rejected
    InvalidInput,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E906: Filesystem operation failed
    IoError,
}

impl ErrorCode {
    /// Numeric code for this error.
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::SkillNotFound => 101,
            Self::SkillCyclicDependency => 102,
            Self::DependencyNotFound => 103,

            Self::ConfigInvalid => 302,
            Self::ConfigMissingRequired => 304,

            Self::StorageError => 601,
            Self::DatabaseError => 604,
            Self::SerializationError => 605,

            Self::InvalidInput => 801,

            Self::IoError => 906,
        }
    }

    /// Code string in the form `E101`.
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Default recovery hint for this code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::SkillNotFound => "Run `sg skill list` or `sg aspire list` to see known skill ids",
            Self::SkillCyclicDependency => "Remove one edge of the existing chain with `sg dep remove` before adding this one",
            Self::DependencyNotFound => "Run `sg dep list` to see existing dependencies",
            Self::ConfigInvalid => "Check TOML syntax and values in the config file",
            Self::ConfigMissingRequired => "Set the missing value in config.toml or via SKILLGRAPH_* environment variables",
            Self::StorageError => "Check that the data path is readable and writable",
            Self::DatabaseError => "The SQLite data file may be locked or corrupted; try a different --data path",
            Self::SerializationError => "The data document may be corrupted. Check it is valid JSON",
            Self::InvalidInput => "Check the command arguments with --help",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Whether the user can act to fix the error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::SkillNotFound
            | Self::SkillCyclicDependency
            | Self::DependencyNotFound
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::StorageError
            | Self::InvalidInput
            | Self::IoError => true,

            Self::DatabaseError | Self::SerializationError => false,
        }
    }

    /// Category name derived from the numeric range.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "skill",
            3 => "config",
            6 => "storage",
            8 => "validation",
            9 => "internal",
            _ => "unknown",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::SkillNotFound,
            Self::SkillCyclicDependency,
            Self::DependencyNotFound,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::StorageError,
            Self::DatabaseError,
            Self::SerializationError,
            Self::InvalidInput,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
