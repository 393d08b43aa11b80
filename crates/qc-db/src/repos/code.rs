//! Code repository: the code hierarchy and its batch parent updates.

use chrono::Utc;

use qc_core::entities::{Code, normalize_code_name};
use qc_core::ids::CodeId;
use qc_core::responses::{
    CodeCodingsResponse, CodeTreeResponse, ParentUpdateFailure, ParentUpdateReport,
    TreeSaveResponse,
};
use qc_core::session::CodeStore;
use qc_core::tree::{self, ParentUpdate, TreeError, TreeNode};

use crate::error::DatabaseError;
use crate::helpers::{get_count, parse_datetime};
use crate::service::QcService;

const CODE_COLUMNS: &str = "c.id, c.name, c.parent_id, c.created_at, c.updated_at,
     (SELECT COUNT(*) FROM codings g WHERE g.code_id = c.id) AS coding_count";

fn row_to_code(row: &libsql::Row) -> Result<Code, DatabaseError> {
    Ok(Code {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        parent_id: row.get::<Option<i64>>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
        coding_count: get_count(row, 5)?,
    })
}

impl QcService {
    /// Create a root code. Names are trimmed and must be unique.
    pub async fn create_code(&self, raw_name: &str) -> Result<Code, DatabaseError> {
        let name = normalize_code_name(raw_name)?;
        let now = Utc::now();

        let tx = self.db().begin_write().await?;
        let result: Result<i64, DatabaseError> = async {
            if self.find_code_by_name(&name).await?.is_some() {
                return Err(DatabaseError::Conflict(format!("code '{name}' already exists")));
            }
            self.db()
                .insert_returning_id(
                    "INSERT INTO codes (name, parent_id, created_at, updated_at)
                     VALUES (?1, NULL, ?2, ?3) RETURNING id",
                    libsql::params![name.as_str(), now.to_rfc3339(), now.to_rfc3339()],
                )
                .await
        }
        .await;
        let id = tx.finish(result).await?;

        tracing::debug!(id, name = %name, "code created");
        Ok(Code {
            id,
            name,
            parent_id: None,
            coding_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_code(&self, id: CodeId) -> Result<Code, DatabaseError> {
        let sql = format!("SELECT {CODE_COLUMNS} FROM codes c WHERE c.id = ?1");
        let mut rows = self.db().query(&sql, [id]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_code(&row)
    }

    pub async fn find_code_by_name(&self, name: &str) -> Result<Option<Code>, DatabaseError> {
        let sql = format!("SELECT {CODE_COLUMNS} FROM codes c WHERE c.name = ?1");
        let mut rows = self.db().query(&sql, [name]).await?;
        rows.next().await?.map(|row| row_to_code(&row)).transpose()
    }

    /// Every code with its coding count, ordered by id.
    pub async fn list_codes(&self) -> Result<Vec<Code>, DatabaseError> {
        let sql = format!("SELECT {CODE_COLUMNS} FROM codes c ORDER BY c.id");
        let mut rows = self.db().query(&sql, ()).await?;
        let mut codes = Vec::new();
        while let Some(row) = rows.next().await? {
            codes.push(row_to_code(&row)?);
        }
        Ok(codes)
    }

    /// Re-parent a single code after checking the move keeps the hierarchy a forest.
    ///
    /// The check and the write run in one write transaction.
    pub async fn set_code_parent(
        &self,
        id: CodeId,
        parent_id: Option<CodeId>,
    ) -> Result<Code, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<(), DatabaseError> = async {
            let codes = self.list_codes().await?;
            if !codes.iter().any(|c| c.id == id) {
                return Err(DatabaseError::NoResult);
            }
            let update = ParentUpdate::new(id, parent_id);
            tree::validate_forest(&codes, &[update])?;
            self.write_parent(update).await
        }
        .await;
        tx.finish(result).await?;
        self.get_code(id).await
    }

    /// Apply a batch of parent updates in one write transaction.
    ///
    /// A cycle or self-parent anywhere in the batch rejects it before any
    /// write. Every other failure is per item: an update naming a missing
    /// parent, or a code that does not exist, is logged and reported in
    /// `failed` while the rest still apply.
    pub async fn update_parents(
        &self,
        updates: &[ParentUpdate],
    ) -> Result<ParentUpdateReport, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = self.apply_parent_updates(updates).await;
        tx.finish(result).await
    }

    /// Body of [`Self::update_parents`]; callers hold the write transaction.
    async fn apply_parent_updates(
        &self,
        updates: &[ParentUpdate],
    ) -> Result<ParentUpdateReport, DatabaseError> {
        let codes = self.list_codes().await?;
        let (applicable, dangling) = tree::split_dangling(&codes, updates);
        tree::validate_forest(&codes, &applicable)?;

        let mut report = ParentUpdateReport::default();
        for update in dangling {
            if let Some(parent_id) = update.parent_id {
                let error = TreeError::MissingParent {
                    id: update.id,
                    parent_id,
                };
                report.failed.push(failure(update, &error));
            }
        }
        for update in applicable {
            match self.write_parent(update).await {
                Ok(()) => report.updated.push(update),
                Err(e) => report.failed.push(failure(update, &e)),
            }
        }
        tracing::info!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "parent updates applied"
        );
        Ok(report)
    }

    async fn write_parent(&self, update: ParentUpdate) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .execute(
                "UPDATE codes SET parent_id = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![update.parent_id, Utc::now().to_rfc3339(), update.id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// The display forest and the codes it cannot place.
    pub async fn code_tree(&self) -> Result<CodeTreeResponse, DatabaseError> {
        let codes = self.list_codes().await?;
        Ok(CodeTreeResponse {
            tree: tree::build_tree(&codes),
            orphans: tree::orphans(&codes),
        })
    }

    /// Persist an edited tree: flatten, diff, validate, write, then rebuild.
    ///
    /// A tree identical to the stored hierarchy issues no writes.
    pub async fn save_code_tree(
        &self,
        edited: &[TreeNode],
    ) -> Result<TreeSaveResponse, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result: Result<ParentUpdateReport, DatabaseError> = async {
            let codes = self.list_codes().await?;
            let updates = tree::plan_tree_save(&codes, edited)?;
            if updates.is_empty() {
                Ok(ParentUpdateReport::default())
            } else {
                self.apply_parent_updates(&updates).await
            }
        }
        .await;
        let report = tx.finish(result).await?;

        let refreshed = self.list_codes().await?;
        Ok(TreeSaveResponse {
            report,
            tree: tree::build_tree(&refreshed),
            orphans: tree::orphans(&refreshed),
        })
    }

    /// A code together with all of its codings and their sources.
    pub async fn code_codings(&self, id: CodeId) -> Result<CodeCodingsResponse, DatabaseError> {
        let code = self.get_code(id).await?;
        let codings = self.list_codings_for_code(id).await?;
        Ok(CodeCodingsResponse { code, codings })
    }
}

fn failure(update: ParentUpdate, error: &impl std::fmt::Display) -> ParentUpdateFailure {
    tracing::warn!(id = update.id, parent_id = ?update.parent_id, error = %error, "parent update failed");
    ParentUpdateFailure {
        id: update.id,
        error: error.to_string(),
    }
}

impl CodeStore for QcService {
    type Error = DatabaseError;

    async fn list_codes(&self) -> Result<Vec<Code>, DatabaseError> {
        Self::list_codes(self).await
    }

    async fn update_parents(
        &self,
        updates: &[ParentUpdate],
    ) -> Result<ParentUpdateReport, DatabaseError> {
        Self::update_parents(self, updates).await
    }
}
