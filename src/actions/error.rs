//! Error handling for the navigation service module

use crate::logging::LogLevel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The dispatcher rejected the action.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl NavigationError {
    pub async fn from_response(response: reqwest::Response) -> NavigationError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        NavigationError::Http { status, message }
    }

    /// Severity used when the failure is logged.
    pub fn log_level(&self) -> LogLevel {
        match self {
            NavigationError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            NavigationError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,
            NavigationError::Http { status, .. } => LogLevel::Error,
            NavigationError::Reqwest(_) => LogLevel::Warn,
        }
    }
}
