//! Error types for report preparation and rendering.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Request-level errors. Field-level problems never surface here; the
/// assembler models them as absent fields.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Session id unknown to the record store.
    #[error("session not found: {session_id}")]
    RecordNotFound { session_id: String },

    /// Assessment type has no configured schema.
    #[error("no configuration found for assessment type: {assessment_type}")]
    SchemaNotFound { assessment_type: String },

    /// Record does not name its assessment type.
    #[error("session {session_id} has no assessment_id")]
    MissingAssessmentType { session_id: String },

    /// Record store could not be opened.
    #[error("invalid record store '{path}': {reason}")]
    InvalidStore { path: String, reason: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid render configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    /// Whether the error is a lookup miss (unknown session or assessment type).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ReportError::RecordNotFound { .. } | ReportError::SchemaNotFound { .. }
        )
    }
}
