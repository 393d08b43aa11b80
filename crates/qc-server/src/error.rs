//! Error types for the HTTP layer.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use qc_db::error::DatabaseError;

/// Failure of a single request, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("identity not allowed")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Well-formed input that would break the code hierarchy.
    #[error("{0}")]
    Unprocessable(String),

    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NoResult => Self::NotFound("not found".to_string()),
            DatabaseError::Conflict(msg) => Self::Conflict(msg),
            DatabaseError::Tree(e) => Self::Unprocessable(e.to_string()),
            DatabaseError::Core(e) => Self::BadRequest(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failure to start or run the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use qc_core::tree::TreeError;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DatabaseError::NoResult, StatusCode::NOT_FOUND)]
    #[case(DatabaseError::Conflict("dup".into()), StatusCode::CONFLICT)]
    #[case(DatabaseError::Tree(TreeError::SelfParent(1)), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(DatabaseError::Query("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn database_errors_map_to_statuses(#[case] err: DatabaseError, #[case] status: StatusCode) {
        assert_eq!(ApiError::from(err).status(), status);
    }

    #[test]
    fn internal_errors_hide_detail() {
        let err = ApiError::from(DatabaseError::Query("secret sql".into()));
        assert_eq!(err.to_string(), "internal server error");
    }
}
