//! Error handling with context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Detailed error context
//! - Recovery suggestions
//! - Error codes for programmatic handling

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ErrorCode {
    // General errors (1xxx)
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,
    InvalidPath = 2003,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    ConfigValidationError = 3003,

    // Process errors (5xxx)
    ProcessError = 5000,
    CommandNotFound = 5001,

    // Platform-specific errors (8xxx)
    GradleError = 8002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            5 => "Process",
            8 => "Platform",
            _ => "Unknown",
        }
    }

    /// Exit code a CLI should use when failing with this error
    pub fn exit_code(&self) -> i32 {
        match self.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            _ if *self == ErrorCode::CommandNotFound => exit_codes::COMMAND_NOT_FOUND,
            _ => exit_codes::FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    ///
    /// Context added later describes an outer operation and is placed in
    /// front of any context already present.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = Some(match self.context.take() {
            Some(inner) => format!("{}: {}", context, inner),
            None => context,
        });
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors

    /// Path that cannot be used for the requested operation
    pub fn invalid_path(path: impl AsRef<Path>, reason: &str) -> Self {
        Self::new(
            ErrorCode::InvalidPath,
            format!("Invalid path {}: {}", path.as_ref().display(), reason),
        )
    }

    /// Configuration problem
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Explicitly requested configuration file is missing
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .codsquad.toml file or use --config to specify a path")
    }

    /// Failure spawning or running an external process
    pub fn process(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProcessError, message)
    }

    /// External command missing from PATH
    pub fn command_not_found(cmd: &str) -> Self {
        Self::new(
            ErrorCode::CommandNotFound,
            format!("Command not found: {}", cmd),
        )
        .with_suggestion(format!("Install {} and ensure it's in your PATH", cmd))
    }

    /// Gradle task failure
    pub fn gradle(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GradleError, message)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const COMMAND_NOT_FOUND: i32 = 127;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Internal, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::GradleError.to_string(), "E8002");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::ConfigParseError.category(), "Configuration");
        assert_eq!(ErrorCode::GradleError.category(), "Platform");
    }

    #[test]
    fn test_error_code_exit_code() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), exit_codes::CONFIG_ERROR);
        assert_eq!(
            ErrorCode::CommandNotFound.exit_code(),
            exit_codes::COMMAND_NOT_FOUND
        );
        assert_eq!(ErrorCode::PermissionDenied.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_io_error_mapping() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::new(ErrorCode::IoError, "disk full"));
        let err = result.context("Copying app-debug.apk").unwrap_err();
        assert_eq!(err.context.as_deref(), Some("Copying app-debug.apk"));
        assert!(err.to_string().contains("Context: Copying app-debug.apk"));
    }

    #[test]
    fn test_nested_context_keeps_inner_detail() {
        let result: Result<()> = Err(Error::new(ErrorCode::PermissionDenied, "denied"));
        let err = result
            .context("Copying app-debug.apk to flutter-apk")
            .context("After task assembleDebug")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(
            err.context.as_deref(),
            Some("After task assembleDebug: Copying app-debug.apk to flutter-apk")
        );
    }

    #[test]
    fn test_command_not_found_suggests_install() {
        let err = Error::command_not_found("gradle");
        assert_eq!(err.code.exit_code(), exit_codes::COMMAND_NOT_FOUND);
        assert!(err.to_string().contains("Install gradle"));
    }
}
