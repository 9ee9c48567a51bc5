use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Errors surfaced by the matching service
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid radix: {field}: {reason}")]
    InvalidRadix { field: String, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Commentary generation failed: {0}")]
    Commentary(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MatchError {
    pub fn invalid_radix(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MatchError::InvalidRadix {
            field: field.into(),
            reason: reason.into(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            MatchError::InvalidRadix { .. } => "invalid_radix",
            MatchError::InvalidRequest(_) => "invalid_request",
            MatchError::Commentary(_) => "commentary_failed",
            MatchError::Config(_) => "config_error",
            MatchError::Serialization(_) => "serialization_error",
        }
    }
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::InvalidRadix { .. } | MatchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            MatchError::Commentary(_) => StatusCode::BAD_GATEWAY,
            MatchError::Config(_) | MatchError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            MatchError::invalid_radix("SUN", "missing body").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MatchError::Commentary("exit 1".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_invalid_radix_message() {
        let err = MatchError::invalid_radix("MOON", "missing body");
        assert_eq!(err.to_string(), "Invalid radix: MOON: missing body");
    }
}
