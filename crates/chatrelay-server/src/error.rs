use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chatrelay::errors::{ErrorEnvelope, DEFAULT_ERROR_STATUS};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// The error envelope as an http response: `{"message"}` with the envelope status
#[derive(Debug)]
pub struct EnvelopeResponse(pub ErrorEnvelope);

impl From<ErrorEnvelope> for EnvelopeResponse {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self(envelope)
    }
}

impl IntoResponse for EnvelopeResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status).unwrap_or_else(|_| {
            tracing::warn!("Provider status {} is not a valid http status", self.0.status);
            StatusCode::from_u16(DEFAULT_ERROR_STATUS).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        });
        (status, Json(self.0)).into_response()
    }
}
