//! Coding repository: excerpts of a source attached to a code.

use chrono::Utc;

use qc_core::entities::Coding;
use qc_core::ids::{CodeId, CodingId, SourceId};
use qc_core::responses::{CodingWithCode, CodingWithSource};

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::repos::source::{SOURCE_COLUMNS, row_to_source_at};
use crate::service::QcService;
use crate::updates::coding::CodingUpdate;

const CODING_COLUMNS: &str = "g.id, g.code_id, g.source_id, g.coded_snippet, g.start_index, g.end_index, g.created_at, g.updated_at";

fn row_to_coding(row: &libsql::Row) -> Result<Coding, DatabaseError> {
    Ok(Coding {
        id: row.get::<i64>(0)?,
        code_id: row.get::<i64>(1)?,
        source_id: row.get::<i64>(2)?,
        snippet: row.get::<String>(3)?,
        start_index: row.get::<Option<i64>>(4)?,
        end_index: row.get::<Option<i64>>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl QcService {
    /// Attach an excerpt of a source to a code.
    ///
    /// Both the source and the code must exist.
    pub async fn create_coding(
        &self,
        source_id: SourceId,
        code_id: CodeId,
        snippet: &str,
        start_index: Option<i64>,
        end_index: Option<i64>,
    ) -> Result<Coding, DatabaseError> {
        let now = Utc::now();
        let tx = self.db().begin_write().await?;
        let result: Result<i64, DatabaseError> = async {
            self.get_source(source_id).await?;
            self.get_code(code_id).await?;
            self.db()
                .insert_returning_id(
                    "INSERT INTO codings (code_id, source_id, coded_snippet, start_index, end_index, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                    libsql::params![
                        code_id,
                        source_id,
                        snippet,
                        start_index,
                        end_index,
                        now.to_rfc3339(),
                        now.to_rfc3339()
                    ],
                )
                .await
        }
        .await;
        let id = tx.finish(result).await?;

        tracing::debug!(id, code_id, source_id, "coding created");
        Ok(Coding {
            id,
            code_id,
            source_id,
            snippet: snippet.to_string(),
            start_index,
            end_index,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_coding(&self, id: CodingId) -> Result<Coding, DatabaseError> {
        let sql = format!("SELECT {CODING_COLUMNS} FROM codings g WHERE g.id = ?1");
        let mut rows = self.db().query(&sql, [id]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_coding(&row)
    }

    pub async fn update_coding(
        &self,
        id: CodingId,
        update: CodingUpdate,
    ) -> Result<Coding, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(snippet) = update.snippet {
            sets.push(format!("coded_snippet = ?{idx}"));
            params.push(snippet.into());
            idx += 1;
        }
        if let Some(start) = update.start_index {
            sets.push(format!("start_index = ?{idx}"));
            params.push(start.into());
            idx += 1;
        }
        if let Some(end) = update.end_index {
            sets.push(format!("end_index = ?{idx}"));
            params.push(end.into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_coding(id).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(Utc::now().to_rfc3339().into());
        idx += 1;
        params.push(id.into());

        let sql = format!("UPDATE codings SET {} WHERE id = ?{idx}", sets.join(", "));
        let tx = self.db().begin_write().await?;
        let result = self
            .db()
            .execute(&sql, libsql::params_from_iter(params))
            .await;
        let affected = tx.finish(result).await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_coding(id).await
    }

    /// Codings of a source with the name of each coding's code, newest first.
    pub async fn list_codings_for_source(
        &self,
        source_id: SourceId,
    ) -> Result<Vec<CodingWithCode>, DatabaseError> {
        let sql = format!(
            "SELECT {CODING_COLUMNS}, c.name
             FROM codings g JOIN codes c ON c.id = g.code_id
             WHERE g.source_id = ?1
             ORDER BY g.id DESC"
        );
        let mut rows = self.db().query(&sql, [source_id]).await?;
        let mut codings = Vec::new();
        while let Some(row) = rows.next().await? {
            codings.push(CodingWithCode {
                coding: row_to_coding(&row)?,
                code_name: row.get::<String>(8)?,
            });
        }
        Ok(codings)
    }

    /// Codings attached to a code with their sources, oldest first.
    pub async fn list_codings_for_code(
        &self,
        code_id: CodeId,
    ) -> Result<Vec<CodingWithSource>, DatabaseError> {
        let sql = format!(
            "SELECT {CODING_COLUMNS}, {SOURCE_COLUMNS}
             FROM codings g JOIN sources s ON s.id = g.source_id
             WHERE g.code_id = ?1
             ORDER BY g.id"
        );
        let mut rows = self.db().query(&sql, [code_id]).await?;
        let mut codings = Vec::new();
        while let Some(row) = rows.next().await? {
            codings.push(CodingWithSource {
                coding: row_to_coding(&row)?,
                source: row_to_source_at(&row, 8)?,
            });
        }
        Ok(codings)
    }
}
