//! `/api/code-tree`: the hierarchy in the tree widget's shape.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::error::ApiError;
use crate::state::AppState;
use crate::widget::{WidgetSaveResponse, WidgetTree, WidgetTreeResponse};

pub async fn get_code_tree(
    State(state): State<AppState>,
) -> Result<Json<WidgetTreeResponse>, ApiError> {
    let response = state.service.code_tree().await?;
    Ok(Json(response.into()))
}

/// Persist a full edited tree. Only codes whose parent changed are written.
pub async fn save_code_tree(
    State(state): State<AppState>,
    payload: Result<Json<WidgetTree>, JsonRejection>,
) -> Result<Json<WidgetSaveResponse>, ApiError> {
    let Json(tree) = payload?;
    let forest = tree.into_forest();
    let saved = state.service.save_code_tree(&forest).await?;
    Ok(Json(saved.into()))
}
