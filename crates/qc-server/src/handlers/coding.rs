//! `/api/coding`.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Deserialize;

use qc_core::entities::Coding;
use qc_core::ids::{CodeId, CodingId, SourceId};
use qc_db::updates::coding::CodingUpdateBuilder;

use crate::error::ApiError;
use crate::handlers::code::not_found_as;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoding {
    pub source_id: SourceId,
    pub code_id: CodeId,
    #[serde(default)]
    pub coded_snippet: String,
    pub start_index: Option<i64>,
    pub end_index: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoding {
    pub id: CodingId,
    pub coded_snippet: String,
}

pub async fn create_coding(
    State(state): State<AppState>,
    payload: Result<Json<CreateCoding>, JsonRejection>,
) -> Result<(StatusCode, Json<Coding>), ApiError> {
    let Json(body) = payload?;
    let coding = state
        .service
        .create_coding(
            body.source_id,
            body.code_id,
            &body.coded_snippet,
            body.start_index,
            body.end_index,
        )
        .await
        .map_err(|e| not_found_as(e, || "source or code not found".to_string()))?;
    Ok((StatusCode::CREATED, Json(coding)))
}

pub async fn update_coding(
    State(state): State<AppState>,
    payload: Result<Json<UpdateCoding>, JsonRejection>,
) -> Result<Json<Coding>, ApiError> {
    let Json(body) = payload?;
    let update = CodingUpdateBuilder::new().snippet(body.coded_snippet).build();
    let coding = state
        .service
        .update_coding(body.id, update)
        .await
        .map_err(|e| not_found_as(e, || format!("coding {} not found", body.id)))?;
    Ok(Json(coding))
}
