//! Core error types for hearthkeep-core.
//!
//! The rules engine itself is infallible. Everything that touches the
//! outside world (SQLite, the config file, the assistant endpoint) reports
//! through this hierarchy.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hearthkeep-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Assistant relay errors
    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors raised at the host boundary.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// No record with the given id
    #[error("No {collection} record with id '{id}'")]
    NotFound { collection: String, id: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors from the chat-completions relay.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// No credential configured
    #[error("Missing assistant API key: set OPENAI_API_KEY or run `hearthkeep auth login --key <KEY>`")]
    MissingApiKey,

    /// Request carried no messages
    #[error("Request must include a non-empty messages array")]
    EmptyConversation,

    /// Upstream returned a non-success status; body is passed through verbatim
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Upstream replied without any assistant text
    #[error("No response from model")]
    EmptyReply,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Credential store failure
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_carries_status_and_body() {
        let err = AssistantError::Upstream {
            status: 429,
            body: "{\"error\":\"rate limited\"}".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limited"));
    }

    #[test]
    fn not_found_names_collection() {
        let err: CoreError = ValidationError::NotFound {
            collection: "bill".into(),
            id: "b-1".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Validation error: No bill record with id 'b-1'"
        );
    }
}
