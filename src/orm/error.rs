//! Error handling for the object-relational service module

use crate::logging::LogLevel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataServiceError {
    /// Failed to decode a JSON payload from the host service
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// An error occurred while processing the request.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The host service answered with an error envelope.
    #[error("Service error: {0}")]
    Service(String),
}

impl DataServiceError {
    pub async fn from_response(response: reqwest::Response) -> DataServiceError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        DataServiceError::Http { status, message }
    }

    /// Severity used when the failure is logged. Rate limiting and server
    /// hiccups are expected during load spikes; auth problems are not.
    pub fn log_level(&self) -> LogLevel {
        match self {
            DataServiceError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            DataServiceError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,
            DataServiceError::Http { status, .. } if *status == 401 || *status == 403 => {
                LogLevel::Error
            }
            DataServiceError::Decode(_) | DataServiceError::Service(_) => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_http_status_severity() {
        let rate_limited = DataServiceError::Http {
            status: 429,
            message: "slow down".to_string(),
        };
        let server_error = DataServiceError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        let unauthorized = DataServiceError::Http {
            status: 401,
            message: "no session".to_string(),
        };

        assert_eq!(rate_limited.log_level(), LogLevel::Debug);
        assert_eq!(server_error.log_level(), LogLevel::Warn);
        assert_eq!(unauthorized.log_level(), LogLevel::Error);
    }

    #[test]
    fn envelope_errors_are_critical() {
        let err = DataServiceError::Service("model not found".to_string());
        assert_eq!(err.log_level(), LogLevel::Error);
    }
}
