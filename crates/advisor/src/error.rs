//! Advisor error types

use thiserror::Error;

/// Errors from prompting the text-generation service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// No API credential configured
    #[error("AI service is not configured")]
    NotConfigured,

    /// The service failed, timed out or answered with nothing usable
    #[error("AI service failure: {0}")]
    Upstream(String),

    /// Request values that cannot be turned into a sensible prompt
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl AdvisorError {
    /// Whether the caller, not the service, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, AdvisorError::InvalidInput(_))
    }
}
