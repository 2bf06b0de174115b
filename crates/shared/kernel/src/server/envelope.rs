use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use tracing::error;
use utoipa::ToSchema;

/// Outcome tag of an [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Failed,
}

/// Uniform body of every fleet response. Absent fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    pub status: Status,
    /// Operation result on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<Value>,
    /// Human readable reason on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    /// # Errors
    ///
    /// Fails only if `data` cannot be represented as JSON.
    pub fn success<T: Serialize + ?Sized>(data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self { status: Status::Success, data: Some(serde_json::to_value(data)?), message: None })
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self { status: Status::Failed, data: None, message: Some(message.into()) }
    }
}

/// An [`Envelope`] paired with its transport status.
///
/// Business rule failures travel as `200 FAILED`; only malformed requests and
/// key conflicts are client errors.
#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    body: Envelope,
}

impl ApiResponse {
    /// `200` with a `SUCCESS` envelope carrying `data`.
    pub fn ok<T: Serialize + ?Sized>(data: &T) -> Self {
        match Envelope::success(data) {
            Ok(body) => Self { status: StatusCode::OK, body },
            Err(err) => Self::internal(err),
        }
    }

    /// `200` with a `FAILED` envelope.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self { status: StatusCode::OK, body: Envelope::failed(message) }
    }

    /// `400` with a `FAILED` envelope.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, body: Envelope::failed(message) }
    }

    /// `500` with a `FAILED` envelope.
    pub fn internal(reason: impl Display) -> Self {
        error!(%reason, "Request failed on an internal error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Envelope::failed(format!("Internal error: {reason}")),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn envelope(&self) -> &Envelope {
        &self.body
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
