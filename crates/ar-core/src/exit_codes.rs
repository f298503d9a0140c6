//! Exit codes for the ar-core CLI.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use ar_config::ValidationError;
use ar_report::ReportError;

/// Exit codes for ar-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Success (0)
    // ========================================================================
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Schema table missing, unparseable or invalid
    ConfigError = 11,

    /// Session not found or has no assessment type
    SessionError = 12,

    /// No schema for the session's assessment type
    SchemaError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        let code = self as i32;
        (10..20).contains(&code)
    }

    /// Check if this exit code is an internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::SessionError => "ERR_SESSION",
            ExitCode::SchemaError => "ERR_SCHEMA",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

impl From<&ReportError> for ExitCode {
    fn from(error: &ReportError) -> Self {
        match error {
            ReportError::RecordNotFound { .. } | ReportError::MissingAssessmentType { .. } => {
                ExitCode::SessionError
            }
            ReportError::SchemaNotFound { .. } => ExitCode::SchemaError,
            ReportError::InvalidStore { .. } => ExitCode::ArgsError,
            ReportError::InvalidConfig(_) => ExitCode::ConfigError,
            ReportError::IoError(_) => ExitCode::IoError,
            ReportError::JsonError(_) => ExitCode::InternalError,
        }
    }
}

impl From<&ValidationError> for ExitCode {
    fn from(error: &ValidationError) -> Self {
        match error {
            ValidationError::IoError(_) => ExitCode::IoError,
            _ => ExitCode::ConfigError,
        }
    }
}
