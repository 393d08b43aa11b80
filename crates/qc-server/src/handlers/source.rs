//! `/api/source`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Deserializer};

use qc_config::GeneralConfig;
use qc_core::entities::Source;
use qc_core::responses::{ReviewSummary, SourceDetail};
use qc_db::repos::source::NewSource;
use qc_db::updates::source::SourceUpdateBuilder;

use crate::error::ApiError;
use crate::handlers::code::not_found_as;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub done: bool,
}

/// Partial source edit. Absent fields are left alone; `null` clears an
/// optional field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSource {
    pub source_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub author: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub publication_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub source_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub search_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub url: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent key.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateSource {
    fn into_builder(self) -> SourceUpdateBuilder {
        let mut builder = SourceUpdateBuilder::new();
        if let Some(name) = self.source_name {
            builder = builder.source_name(name);
        }
        if let Some(author) = self.author {
            builder = builder.author(author);
        }
        if let Some(title) = self.publication_title {
            builder = builder.publication_title(title);
        }
        if let Some(source_type) = self.source_type {
            builder = builder.source_type(source_type);
        }
        if let Some(search_type) = self.search_type {
            builder = builder.search_type(search_type);
        }
        if let Some(url) = self.url {
            builder = builder.url(url);
        }
        builder
    }
}

pub async fn list_sources(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Source>>, ApiError> {
    let limit = GeneralConfig::resolve_limit(query.limit, state.list_limit);
    Ok(Json(state.service.list_sources(limit).await?))
}

pub async fn create_source(
    State(state): State<AppState>,
    payload: Result<Json<NewSource>, JsonRejection>,
) -> Result<(StatusCode, Json<Source>), ApiError> {
    let Json(body) = payload?;
    let source = state.service.create_source(&body).await?;
    Ok((StatusCode::CREATED, Json(source)))
}

pub async fn review_summary(
    State(state): State<AppState>,
) -> Result<Json<ReviewSummary>, ApiError> {
    Ok(Json(state.service.review_summary().await?))
}

pub async fn source_detail(
    State(state): State<AppState>,
    Path(number): Path<i64>,
) -> Result<Json<SourceDetail>, ApiError> {
    let detail = state
        .service
        .source_detail(number)
        .await
        .map_err(|e| not_found_as(e, || format!("source {number} not found")))?;
    Ok(Json(detail))
}

/// Mark the initial coding pass over a source as done or not done.
pub async fn review_source(
    State(state): State<AppState>,
    Path(number): Path<i64>,
    payload: Result<Json<ReviewBody>, JsonRejection>,
) -> Result<Json<Source>, ApiError> {
    let Json(body) = payload?;
    let source = state
        .service
        .set_initial_coding_done(number, body.done)
        .await
        .map_err(|e| not_found_as(e, || format!("source {number} not found")))?;
    Ok(Json(source))
}

/// Edit the descriptive fields of a source.
pub async fn update_source(
    State(state): State<AppState>,
    Path(number): Path<i64>,
    payload: Result<Json<UpdateSource>, JsonRejection>,
) -> Result<Json<Source>, ApiError> {
    let Json(body) = payload?;
    let source = state
        .service
        .update_source(number, body.into_builder().build())
        .await
        .map_err(|e| not_found_as(e, || format!("source {number} not found")))?;
    Ok(Json(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_body_separates_null_from_absent() {
        let body: UpdateSource =
            serde_json::from_str(r#"{"sourceName":"Renamed","url":null}"#).unwrap();
        let update = body.into_builder().build();
        assert_eq!(update.source_name.as_deref(), Some("Renamed"));
        assert_eq!(update.url, Some(None));
        assert_eq!(update.author, None);
    }
}
