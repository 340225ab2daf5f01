//! Error handling for skillgraph.
//!
//! This module provides:
//! - [`SgError`]: The main error enum for all operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Serializable error with suggestion and context

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for skillgraph operations.
#[derive(Error, Debug)]
pub enum SgError {
    #[error("Adding this dependency would create a circular dependency: {from} -> {to}")]
    CircularDependency { from: String, to: String },

    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    #[error("Dependency not found: {from} -> {to}")]
    DependencyNotFound { from: String, to: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl SgError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::CircularDependency { .. } => ErrorCode::SkillCyclicDependency,
            Self::SkillNotFound(_) => ErrorCode::SkillNotFound,
            Self::DependencyNotFound { .. } => ErrorCode::DependencyNotFound,
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Storage(_) => ErrorCode::StorageError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::CircularDependency { from, to } | Self::DependencyNotFound { from, to } => {
                Some(serde_json::json!({ "from": from, "to": to }))
            }
            Self::SkillNotFound(id) => Some(serde_json::json!({ "skill_id": id })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Recovery hint, naming the ids involved where there are any.
    #[must_use]
    pub fn suggestion(&self) -> String {
        match self {
            Self::CircularDependency { from, to } => format!(
                "'{to}' already leads to '{from}'; see `sg graph path {from}` and remove one edge of that chain with `sg dep remove`"
            ),
            Self::SkillNotFound(id) => {
                format!("Run `sg skill list -q {id}` or `sg aspire list` to find the right id")
            }
            Self::DependencyNotFound { to, .. } => {
                format!("Run `sg dep list --skill {to}` to see the edges of '{to}'")
            }
            _ => self.code().suggestion().to_string(),
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_sg_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "SKILL_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "skill", "config", "storage")
    pub category: String,
}

impl StructuredError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn from_sg_error(err: &SgError) -> Self {
        Self {
            context: err.context(),
            ..Self::new(err.code(), err.to_string())
        }
        .with_suggestion(err.suggestion())
    }

    /// Set a custom suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&SgError> for StructuredError {
    fn from(err: &SgError) -> Self {
        Self::from_sg_error(err)
    }
}

/// Result type alias using `SgError`.
pub type Result<T> = std::result::Result<T, SgError>;
