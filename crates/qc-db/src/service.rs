//! Service layer over the database handle.
//!
//! `QcService` wraps `QcDb`. All repo methods are implemented as
//! `impl QcService` blocks under [`crate::repos`].

use crate::QcDb;
use crate::error::DatabaseError;

/// Entry point for every repository operation.
pub struct QcService {
    db: QcDb,
}

impl QcService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = QcDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `QcDb`.
    #[must_use]
    pub const fn from_db(db: QcDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &QcDb {
        &self.db
    }
}
