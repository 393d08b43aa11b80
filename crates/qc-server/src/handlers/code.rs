//! `/api/code` and `/api/update-code-parents`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use qc_core::entities::Code;
use qc_core::ids::CodeId;
use qc_core::responses::{CodeCodingsResponse, ParentUpdateReport};
use qc_core::tree::ParentUpdate;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCode {
    #[serde(alias = "name")]
    pub code_name: String,
}

pub async fn list_codes(State(state): State<AppState>) -> Result<Json<Vec<Code>>, ApiError> {
    Ok(Json(state.service.list_codes().await?))
}

pub async fn create_code(
    State(state): State<AppState>,
    payload: Result<Json<CreateCode>, JsonRejection>,
) -> Result<(StatusCode, Json<Code>), ApiError> {
    let Json(body) = payload?;
    let code = state.service.create_code(&body.code_name).await?;
    Ok((StatusCode::CREATED, Json(code)))
}

/// Re-parent one code. Accepts `{id, parentId}` or a full code object.
pub async fn move_code(
    State(state): State<AppState>,
    payload: Result<Json<ParentUpdate>, JsonRejection>,
) -> Result<Json<Code>, ApiError> {
    let Json(update) = payload?;
    let code = state
        .service
        .set_code_parent(update.id, update.parent_id)
        .await
        .map_err(|e| not_found_as(e, || format!("code {} not found", update.id)))?;
    Ok(Json(code))
}

pub async fn code_codings(
    State(state): State<AppState>,
    Path(id): Path<CodeId>,
) -> Result<Json<CodeCodingsResponse>, ApiError> {
    let response = state
        .service
        .code_codings(id)
        .await
        .map_err(|e| not_found_as(e, || format!("code {id} not found")))?;
    Ok(Json(response))
}

/// Batch re-parent. Accepts an array of `{id, parentId}` or full code objects.
pub async fn update_code_parents(
    State(state): State<AppState>,
    payload: Result<Json<Vec<ParentUpdate>>, JsonRejection>,
) -> Result<Json<ParentUpdateReport>, ApiError> {
    let Json(updates) = payload?;
    Ok(Json(state.service.update_parents(&updates).await?))
}

/// Map `NoResult` to a 404 carrying a resource-specific message.
pub(crate) fn not_found_as(
    err: qc_db::error::DatabaseError,
    message: impl FnOnce() -> String,
) -> ApiError {
    match err {
        qc_db::error::DatabaseError::NoResult => ApiError::NotFound(message()),
        other => other.into(),
    }
}
