use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::response_normalizer::NormalizeError;

pub const MISSING_API_KEY_MESSAGE: &str = "Missing GEMINI_API_KEY environment variable.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";
pub const MISSING_FIELDS_MESSAGE: &str = "Both 'content' and 'vibe' are required.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "Something went wrong generating your posts. Please try again.";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("language model credential is not configured")]
    Configuration,

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("language model call failed: {0:#}")]
    Upstream(#[source] anyhow::Error),

    #[error("malformed model reply: {source}")]
    MalformedResponse {
        #[source]
        source: NormalizeError,
        raw: String,
    },
}

impl GenerateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::Validation(_) => StatusCode::BAD_REQUEST,
            GenerateError::Configuration
            | GenerateError::Upstream(_)
            | GenerateError::MalformedResponse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Pipeline failures share one generic message.
    pub fn client_message(&self) -> &str {
        match self {
            GenerateError::Configuration => MISSING_API_KEY_MESSAGE,
            GenerateError::Validation(message) => message,
            GenerateError::Upstream(_) | GenerateError::MalformedResponse { .. } => {
                GENERATION_FAILED_MESSAGE
            }
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        match &self {
            GenerateError::Configuration => tracing::error!("{}", MISSING_API_KEY_MESSAGE),
            GenerateError::Validation(message) => tracing::debug!("Rejected request: {}", message),
            GenerateError::Upstream(e) => tracing::error!("Gemini API error: {:#}", e),
            GenerateError::MalformedResponse { source, raw } => {
                tracing::error!(raw = %raw, "Gemini reply could not be normalized: {}", source)
            }
        }

        (
            self.status_code(),
            Json(json!({ "error": self.client_message() })),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("History database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Invalid history limit '{0}'")]
    InvalidLimit(String),
}

impl IntoResponse for HistoryError {
    fn into_response(self) -> Response {
        if let HistoryError::InvalidLimit(_) = self {
            tracing::debug!("Rejected history request: {}", self);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "'limit' must be a whole number." })),
            )
                .into_response();
        }

        tracing::error!("History request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to access history." })),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
