//! Response shaping.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use incidesk_domain::value::Row;

/// Content type sent with every JSON payload, spelled the way existing
/// clients expect it.
pub const JSON_CONTENT_TYPE: &str = "Application/JSON";

/// Data returned by a handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Rows(Vec<Row>),
    Row(Row),
}

impl From<Vec<Row>> for Payload {
    fn from(rows: Vec<Row>) -> Self {
        Self::Rows(rows)
    }
}

impl From<Row> for Payload {
    fn from(row: Row) -> Self {
        Self::Row(row)
    }
}

/// A successful handler result: a status and a JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: StatusCode,
    payload: Payload,
}

impl Reply {
    /// `200 OK` with a JSON payload.
    pub fn ok(payload: impl Into<Payload>) -> Self {
        Self::with_status(StatusCode::OK, payload)
    }

    /// `201 Created` with a JSON payload.
    pub fn created(payload: impl Into<Payload>) -> Self {
        Self::with_status(StatusCode::CREATED, payload)
    }

    fn with_status(status: StatusCode, payload: impl Into<Payload>) -> Self {
        Self {
            status,
            payload: payload.into(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.payload) {
            Ok(bytes) => (
                self.status,
                [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                bytes,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to encode response payload");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
