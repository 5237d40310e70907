//! Feed error types

use thiserror::Error;

/// Errors that can occur while producing a price entry
#[derive(Error, Debug)]
pub enum FeedError {
    /// Network, DNS or timeout failure reaching the source page
    #[error("Failed to fetch source page: {0}")]
    Transport(String),

    /// Source answered with a non-success status
    #[error("Source page returned HTTP {status}")]
    Status { status: u16 },

    /// Source answered with something other than text/html
    #[error("Source page is not text (content-type: {content_type})")]
    NonText { content_type: String },

    /// Page parsed but the target denomination row is absent
    #[error("Target denomination '{label}' not found")]
    NotFound { label: String },

    /// Invalid row selector
    #[error("Invalid row selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Invalid schedule expression
    #[error("Invalid schedule '{0}'. Expected HH:MM")]
    Schedule(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FeedError {
    /// Short machine-friendly label, used as a metrics dimension
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Transport(_) => "transport",
            FeedError::Status { .. } => "status",
            FeedError::NonText { .. } => "non_text",
            FeedError::NotFound { .. } => "not_found",
            FeedError::Selector { .. } => "selector",
            FeedError::Schedule(_) => "schedule",
            FeedError::Client(_) => "client",
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Transport(format!("request timed out: {}", err))
        } else {
            FeedError::Transport(err.to_string())
        }
    }
}
