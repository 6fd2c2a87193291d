//! HTTP error response mapping.
//!
//! Errors never carry a body: the status line is the whole answer, and the
//! detail goes to the log.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use incidesk_domain::error::{IncideskError, ValidationError};

use crate::body::BodyError;

/// Everything that can stop a request from producing a [`Reply`](crate::response::Reply).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No route of the request method matches the path.
    #[error("no route matches the request")]
    RouteNotFound,

    /// A handler asked for a path capture its pattern does not define.
    #[error("route has no capture {0}")]
    MissingCapture(usize),

    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Query(#[from] QueryRejection),

    #[error(transparent)]
    App(#[from] IncideskError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::App(err.into())
    }
}

impl ApiError {
    /// Status code sent for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RouteNotFound => StatusCode::NOT_IMPLEMENTED,
            Self::Body(BodyError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Body(_)
            | Self::Query(_)
            | Self::App(IncideskError::Validation(_) | IncideskError::WriteFailed(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingCapture(_)
            | Self::App(IncideskError::NotFound(_) | IncideskError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        status.into_response()
    }
}
