use axum::{response::{IntoResponse, Response}, http::StatusCode};
use serde::Serialize;

use crate::util::booking_store::BookingStoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    BadRequest,
    Unauthorized,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

/// JSON error body returned by every handler
#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl HandlerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HandlerError { error: HandlerErrorKind::BadRequest, message: message.into(), details: None }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HandlerError { error: HandlerErrorKind::Unauthorized, message: message.into(), details: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        HandlerError { error: HandlerErrorKind::Internal, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(self);
        (status, body).into_response()
    }
}


#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Upstream Error: {0}")]
    Upstream(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<BookingStoreError> for ServiceError {
    fn from(err: BookingStoreError) -> Self {
        match err {
            BookingStoreError::Config(msg) => ServiceError::InternalError(msg),
            other => ServiceError::Upstream(other.to_string()),
        }
    }
}
