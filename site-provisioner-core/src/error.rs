//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::saga::CompensationReport;

// Re-export library error type
pub use site_provisioner_provider::ProviderError;

/// Core layer error type
///
/// Expected operational outcomes of a workflow (domain taken, zone creation rejected) are not
/// errors: they are reported inside [`WorkflowResult`](crate::WorkflowResult). This type
/// covers faults.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Configuration missing or malformed (names the offending field)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (bad domain syntax, zero registration years)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Retry policy that cannot run (zero attempts)
    #[error("Invalid retry policy: {0}")]
    InvalidRetryPolicy(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// A fault interrupted the workflow; the compensator already ran.
    #[error("Workflow aborted: {reason}")]
    WorkflowAborted {
        reason: String,
        compensation: CompensationReport,
    },

    /// File system error (config file)
    #[error("I/O error: {0}")]
    Io(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing configuration) is used for log
    /// classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::InvalidRetryPolicy(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::WorkflowAborted { .. } | Self::Io(_) | Self::Serialization(_) => false,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
