//! Identity allow-list middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Reject requests whose forwarded identity is not on the allow-list.
///
/// Passes everything through when the allow-list is empty.
pub async fn require_allowed_identity(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = &state.auth;
    if !auth.is_enforced() {
        return Ok(next.run(request).await);
    }

    let email = request
        .headers()
        .get(auth.identity_header.as_str())
        .and_then(|v| v.to_str().ok());

    match email {
        Some(email) if auth.is_allowed(email) => Ok(next.run(request).await),
        Some(email) => {
            tracing::warn!(email, path = %request.uri().path(), "identity not on allow-list");
            Err(ApiError::Unauthorized)
        }
        None => {
            tracing::debug!(header = %auth.identity_header, "identity header missing");
            Err(ApiError::Unauthorized)
        }
    }
}
