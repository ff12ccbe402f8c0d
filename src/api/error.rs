//! JSON error bodies and the mapping from [`Error`] onto HTTP statuses.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer};
use tracing::warn;

/// Body of every error response: `{"statusCode": 404, "message": "..."}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    pub message: String,
}

fn serialize_status<S>(value: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(value.as_u16())
}

impl From<(StatusCode, String)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, String)) -> Self {
        Self {
            status_code,
            message,
        }
    }
}

impl From<(StatusCode, &str)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, &str)) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }
}

impl From<JsonRejection> for ErrorMessage {
    fn from(rejection: JsonRejection) -> Self {
        Self::from((StatusCode::BAD_REQUEST, rejection.body_text()))
    }
}

impl From<QueryRejection> for ErrorMessage {
    fn from(rejection: QueryRejection) -> Self {
        Self::from((StatusCode::BAD_REQUEST, rejection.body_text()))
    }
}

impl IntoResponse for ErrorMessage {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

impl From<Error> for ErrorMessage {
    fn from(error: Error) -> Self {
        match error {
            Error::Validation { message } => Self::from((StatusCode::BAD_REQUEST, message)),
            Error::Payload(e) => Self::from((StatusCode::BAD_REQUEST, format!("invalid data: {e}"))),
            e @ (Error::ElementNotFound { .. } | Error::NotFound { .. }) => {
                Self::from((StatusCode::NOT_FOUND, e.to_string()))
            }
            Error::Unauthorized { reason } => {
                warn!(reason = %reason, "unauthorized request");
                Self::from((StatusCode::UNAUTHORIZED, reason))
            }
            Error::Forbidden { role } => {
                warn!(role = %role, "role not allowed");
                Self::from((
                    StatusCode::FORBIDDEN,
                    format!("role {role} may not perform this action"),
                ))
            }
            Error::Database(e) => {
                warn!(error = ?e, "database error");
                Self::from((StatusCode::INTERNAL_SERVER_ERROR, "internal server error"))
            }
            e @ (Error::Config { .. } | Error::Io(_)) => {
                warn!(error = %e, "internal error");
                Self::from((StatusCode::INTERNAL_SERVER_ERROR, "internal server error"))
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        ErrorMessage::from(self).into_response()
    }
}
