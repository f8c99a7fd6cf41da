//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the document-discovery search engine,
//! providing structured error types for all system components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from normalization, catalog loading, the
//!   remote search collaborator, and configuration
//! - **Output**: Structured error types with context
//! - **Error Categories**: Normalization, Remote, Catalog, Configuration
//!
//! ## Error Philosophy
//! Nothing in this subsystem surfaces an error to the presentation layer.
//! Normalization failures degrade to a naive substring match inside
//! `LocalIndexSearch`; remote failures are logged and the orchestrator
//! settles on the local results. Stale-result discards and empty-query
//! resets are ordinary control flow, not errors, and have no variant here.

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Error types for the document-discovery search engine
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Query normalization failed; callers degrade to naive matching
    #[error("query normalization failed: {reason}")]
    NormalizationFailed { reason: String },

    /// Remote search collaborator error, timeout, or explicit failure
    #[error("remote search unavailable: {details}")]
    RemoteUnavailable { details: String },

    /// Catalog could not be loaded or is malformed
    #[error("failed to load catalog from {path}: {details}")]
    CatalogLoadFailed { path: String, details: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Internal system errors
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DiscoveryError {
    /// Check if the error is recoverable without operator intervention
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DiscoveryError::RemoteUnavailable { .. } | DiscoveryError::NormalizationFailed { .. }
        )
    }

    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            DiscoveryError::NormalizationFailed { .. } => "normalization",
            DiscoveryError::RemoteUnavailable { .. } => "remote",
            DiscoveryError::CatalogLoadFailed { .. } => "catalog",
            DiscoveryError::Config { .. } | DiscoveryError::Toml(_) => "configuration",
            DiscoveryError::ValidationFailed { .. } => "validation",
            DiscoveryError::Io(_) | DiscoveryError::Json(_) => "io",
            DiscoveryError::Internal { .. } => "generic",
        }
    }
}

impl From<reqwest::Error> for DiscoveryError {
    fn from(err: reqwest::Error) -> Self {
        DiscoveryError::RemoteUnavailable {
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_and_normalization_errors_are_recoverable() {
        let err = DiscoveryError::RemoteUnavailable {
            details: "connection refused".to_string(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.category(), "remote");

        let err = DiscoveryError::NormalizationFailed {
            reason: "query too long".to_string(),
        };
        assert!(err.is_recoverable());
    }

    #[test]
    fn config_errors_are_not_recoverable() {
        let err = DiscoveryError::Config {
            message: "bad endpoint".to_string(),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.category(), "configuration");
    }
}
