//! Error taxonomy for room resolution and token issuance

use crate::platform::PlatformError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{error, warn};

/// Errors surfaced by the directory, provisioner, issuer and resolver
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Malformed input, rejected before any I/O
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Backing store could not be read or written
    #[error("Directory store unavailable: {reason}")]
    StoreUnavailable {
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// External create-session call failed; nothing was stored
    #[error("Session creation failed: {0}")]
    SessionCreationFailed(#[source] PlatformError),

    #[error("Token signing failed: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    /// Pass-through failure from an archive, caption or render call
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl RoomError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn store(reason: impl Into<String>, source: std::io::Error) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
            source: Some(source),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::SessionCreationFailed(_) | Self::TokenSigning(_) | Self::Platform(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for RoomError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for RoomError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RoomError::invalid("empty room name").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RoomError::store(
                "writing directory",
                std::io::Error::new(std::io::ErrorKind::Other, "disk full")
            )
            .status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            RoomError::SessionCreationFailed(PlatformError::MissingSession).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_session_creation_keeps_cause() {
        let err = RoomError::SessionCreationFailed(PlatformError::Api {
            status: 403,
            message: "Invalid credentials".to_string(),
        });

        assert!(err.to_string().contains("Invalid credentials"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
