//! Source repository: the documents being coded and their review state.

use chrono::Utc;
use serde::Deserialize;

use qc_core::entities::Source;
use qc_core::ids::SourceId;
use qc_core::responses::{ReviewSummary, SourceDetail, UNSPECIFIED_SOURCE_TYPE};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_count, get_opt_string, parse_datetime};
use crate::service::QcService;
use crate::updates::source::{SourceUpdate, SourceUpdateBuilder};

pub(crate) const SOURCE_COLUMNS: &str = "s.id, s.source_number, s.author, s.source_name, s.publication_title, s.source_type, s.search_type, s.url, s.initial_coding_done, s.created_at, s.updated_at";

/// Fields supplied when registering a new source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSource {
    pub source_number: i64,
    pub source_name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publication_title: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub search_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub initial_coding_done: bool,
}

impl NewSource {
    pub fn new(source_number: i64, source_name: impl Into<String>) -> Self {
        Self {
            source_number,
            source_name: source_name.into(),
            author: None,
            publication_title: None,
            source_type: None,
            search_type: None,
            url: None,
            initial_coding_done: false,
        }
    }
}

/// Parse a source whose columns start at `offset` (used after joins).
pub(crate) fn row_to_source_at(row: &libsql::Row, offset: i32) -> Result<Source, DatabaseError> {
    Ok(Source {
        id: row.get::<i64>(offset)?,
        source_number: row.get::<i64>(offset + 1)?,
        author: get_opt_string(row, offset + 2)?,
        source_name: row.get::<String>(offset + 3)?,
        publication_title: get_opt_string(row, offset + 4)?,
        source_type: get_opt_string(row, offset + 5)?,
        search_type: get_opt_string(row, offset + 6)?,
        url: get_opt_string(row, offset + 7)?,
        initial_coding_done: get_bool(row, offset + 8)?,
        created_at: parse_datetime(&row.get::<String>(offset + 9)?)?,
        updated_at: parse_datetime(&row.get::<String>(offset + 10)?)?,
    })
}

fn row_to_source(row: &libsql::Row) -> Result<Source, DatabaseError> {
    row_to_source_at(row, 0)
}

impl QcService {
    pub async fn create_source(&self, new: &NewSource) -> Result<Source, DatabaseError> {
        let name = new.source_name.trim();
        if name.is_empty() {
            return Err(DatabaseError::Core(qc_core::errors::CoreError::Validation(
                "source name must not be empty".to_string(),
            )));
        }

        let now = Utc::now();
        let tx = self.db().begin_write().await?;
        let result: Result<i64, DatabaseError> = async {
            if self.find_source_by_number(new.source_number).await?.is_some() {
                return Err(DatabaseError::Conflict(format!(
                    "source number {} already exists",
                    new.source_number
                )));
            }
            self.db()
                .insert_returning_id(
                    "INSERT INTO sources (source_number, author, source_name, publication_title, source_type, search_type, url, initial_coding_done, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) RETURNING id",
                    libsql::params![
                        new.source_number,
                        new.author.as_deref(),
                        name,
                        new.publication_title.as_deref(),
                        new.source_type.as_deref(),
                        new.search_type.as_deref(),
                        new.url.as_deref(),
                        i64::from(new.initial_coding_done),
                        now.to_rfc3339(),
                        now.to_rfc3339()
                    ],
                )
                .await
        }
        .await;
        let id = tx.finish(result).await?;

        tracing::debug!(id, number = new.source_number, "source created");
        Ok(Source {
            id,
            source_number: new.source_number,
            author: new.author.clone(),
            source_name: name.to_string(),
            publication_title: new.publication_title.clone(),
            source_type: new.source_type.clone(),
            search_type: new.search_type.clone(),
            url: new.url.clone(),
            initial_coding_done: new.initial_coding_done,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_source(&self, id: SourceId) -> Result<Source, DatabaseError> {
        let sql = format!("SELECT {SOURCE_COLUMNS} FROM sources s WHERE s.id = ?1");
        let mut rows = self.db().query(&sql, [id]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_source(&row)
    }

    pub async fn find_source_by_number(
        &self,
        number: i64,
    ) -> Result<Option<Source>, DatabaseError> {
        let sql = format!("SELECT {SOURCE_COLUMNS} FROM sources s WHERE s.source_number = ?1");
        let mut rows = self.db().query(&sql, [number]).await?;
        rows.next().await?.map(|row| row_to_source(&row)).transpose()
    }

    pub async fn get_source_by_number(&self, number: i64) -> Result<Source, DatabaseError> {
        self.find_source_by_number(number)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Sources ordered by source number.
    pub async fn list_sources(&self, limit: u32) -> Result<Vec<Source>, DatabaseError> {
        let sql = format!("SELECT {SOURCE_COLUMNS} FROM sources s ORDER BY s.source_number LIMIT ?1");
        let mut rows = self.db().query(&sql, [i64::from(limit)]).await?;
        let mut sources = Vec::new();
        while let Some(row) = rows.next().await? {
            sources.push(row_to_source(&row)?);
        }
        Ok(sources)
    }

    /// A source by number with its codings, newest first.
    pub async fn source_detail(&self, number: i64) -> Result<SourceDetail, DatabaseError> {
        let source = self.get_source_by_number(number).await?;
        let codings = self.list_codings_for_source(source.id).await?;
        Ok(SourceDetail { source, codings })
    }

    /// Apply a partial edit to a source. An empty edit returns the source as is.
    pub async fn update_source(
        &self,
        number: i64,
        update: SourceUpdate,
    ) -> Result<Source, DatabaseError> {
        let source_name = match update.source_name {
            Some(name) if name.trim().is_empty() => {
                return Err(DatabaseError::Core(qc_core::errors::CoreError::Validation(
                    "source name must not be empty".to_string(),
                )));
            }
            other => other.map(|name| name.trim().to_string()),
        };

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        let mut push_text = |column: &str, value: Option<Option<String>>| {
            if let Some(value) = value {
                sets.push(format!("{column} = ?{idx}"));
                params.push(value.into());
                idx += 1;
            }
        };
        push_text("author", update.author);
        push_text("source_name", source_name.map(Some));
        push_text("publication_title", update.publication_title);
        push_text("source_type", update.source_type);
        push_text("search_type", update.search_type);
        push_text("url", update.url);

        if let Some(done) = update.initial_coding_done {
            sets.push(format!("initial_coding_done = ?{idx}"));
            params.push(i64::from(done).into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_source_by_number(number).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;
        params.push(number.into());

        let sql = format!(
            "UPDATE sources SET {} WHERE source_number = ?{idx}",
            sets.join(", ")
        );
        let tx = self.db().begin_write().await?;
        let result = self
            .db()
            .execute(&sql, libsql::params_from_iter(params))
            .await;
        let affected = tx.finish(result).await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_source_by_number(number).await
    }

    /// Mark whether the initial coding pass over a source is finished.
    pub async fn set_initial_coding_done(
        &self,
        number: i64,
        done: bool,
    ) -> Result<Source, DatabaseError> {
        let update = SourceUpdateBuilder::new().initial_coding_done(done).build();
        self.update_source(number, update).await
    }

    /// Count reviewed sources, in total and per source type.
    pub async fn review_summary(&self) -> Result<ReviewSummary, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                "SELECT COALESCE(NULLIF(TRIM(source_type), ''), ?1) AS kind, COUNT(*) FROM sources
                 WHERE initial_coding_done = 1
                 GROUP BY kind",
                [UNSPECIFIED_SOURCE_TYPE],
            )
            .await?;

        let mut summary = ReviewSummary::default();
        while let Some(row) = rows.next().await? {
            let count = get_count(&row, 1)?;
            summary.total_reviewed += count;
            summary.by_source_type.insert(row.get::<String>(0)?, count);
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_support::helpers::{seed_code, seed_source, test_service};

    fn typed(number: i64, source_type: Option<&str>, done: bool) -> NewSource {
        NewSource {
            source_type: source_type.map(String::from),
            initial_coding_done: done,
            ..NewSource::new(number, format!("Source {number}"))
        }
    }

    #[tokio::test]
    async fn create_source_roundtrip() {
        let svc = test_service().await;
        let new = NewSource {
            author: Some("Ostrom".into()),
            url: Some("https://example.org/paper".into()),
            ..NewSource::new(12, "Governing the Commons")
        };
        let created = svc.create_source(&new).await.unwrap();
        let fetched = svc.get_source_by_number(12).await.unwrap();
        assert_eq!(fetched, created);
        assert!(!fetched.initial_coding_done);
    }

    #[tokio::test]
    async fn duplicate_source_number_conflicts() {
        let svc = test_service().await;
        seed_source(&svc, 1, "First").await;
        assert!(matches!(
            svc.create_source(&NewSource::new(1, "Second")).await,
            Err(DatabaseError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn blank_source_name_is_rejected() {
        let svc = test_service().await;
        assert!(matches!(
            svc.create_source(&NewSource::new(1, "  ")).await,
            Err(DatabaseError::Core(_))
        ));
    }

    #[tokio::test]
    async fn list_sources_orders_by_number() {
        let svc = test_service().await;
        seed_source(&svc, 3, "C").await;
        seed_source(&svc, 1, "A").await;
        seed_source(&svc, 2, "B").await;

        let numbers: Vec<i64> = svc
            .list_sources(50)
            .await
            .unwrap()
            .iter()
            .map(|s| s.source_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(svc.list_sources(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn source_detail_missing_is_no_result() {
        let svc = test_service().await;
        assert!(matches!(
            svc.source_detail(404).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn source_detail_lists_codings() {
        let svc = test_service().await;
        let code = seed_code(&svc, "Trust", None).await;
        let source = seed_source(&svc, 7, "Interview").await;
        svc.create_coding(source.id, code.id, "excerpt", None, None)
            .await
            .unwrap();

        let detail = svc.source_detail(7).await.unwrap();
        assert_eq!(detail.source.id, source.id);
        assert_eq!(detail.codings.len(), 1);
        assert_eq!(detail.codings[0].code_name, "Trust");
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn set_initial_coding_done_toggles(#[case] done: bool) {
        let svc = test_service().await;
        seed_source(&svc, 1, "Interview").await;
        let source = svc.set_initial_coding_done(1, done).await.unwrap();
        assert_eq!(source.initial_coding_done, done);
    }

    #[tokio::test]
    async fn update_source_clears_optional_fields() {
        let svc = test_service().await;
        let new = NewSource {
            url: Some("https://example.org".into()),
            ..NewSource::new(1, "Interview")
        };
        svc.create_source(&new).await.unwrap();

        let update = SourceUpdateBuilder::new()
            .url(None)
            .source_name("Interview, transcribed")
            .build();
        let source = svc.update_source(1, update).await.unwrap();
        assert_eq!(source.url, None);
        assert_eq!(source.source_name, "Interview, transcribed");
    }

    #[tokio::test]
    async fn update_source_rejects_blank_name() {
        let svc = test_service().await;
        seed_source(&svc, 1, "Interview").await;
        let update = SourceUpdateBuilder::new().source_name("   ").build();
        assert!(matches!(
            svc.update_source(1, update).await,
            Err(DatabaseError::Core(_))
        ));
        assert_eq!(svc.get_source_by_number(1).await.unwrap().source_name, "Interview");
    }

    #[tokio::test]
    async fn update_source_missing_is_no_result() {
        let svc = test_service().await;
        let update = SourceUpdateBuilder::new().author(Some("Ostrom".into())).build();
        assert!(matches!(
            svc.update_source(9, update).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn review_summary_counts_reviewed_sources_by_type() {
        let svc = test_service().await;
        for new in [
            typed(1, Some("article"), true),
            typed(2, Some("article"), true),
            typed(3, Some("report"), true),
            typed(4, Some("report"), false),
            typed(5, None, true),
            typed(6, Some("  "), true),
        ] {
            svc.create_source(&new).await.unwrap();
        }

        let summary = svc.review_summary().await.unwrap();
        assert_eq!(summary.total_reviewed, 5);
        assert_eq!(
            summary.by_source_type,
            BTreeMap::from([
                ("article".to_string(), 2),
                ("report".to_string(), 1),
                (UNSPECIFIED_SOURCE_TYPE.to_string(), 2),
            ])
        );
    }
}
