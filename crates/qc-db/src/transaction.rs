//! Serialized write transactions.
//!
//! Every repository write goes through [`QcDb::begin_write`]. The service
//! shares one connection between concurrent callers, so the write lock keeps
//! two transactions from interleaving on it, and `BEGIN IMMEDIATE` keeps
//! other processes out while a check-then-write sequence runs.

use libsql::TransactionBehavior;
use tokio::sync::MutexGuard;

use crate::QcDb;
use crate::error::DatabaseError;

/// An open `BEGIN IMMEDIATE` transaction holding the write lock.
///
/// Statements issued through [`QcDb`] while it is held run inside it. Close it
/// with [`WriteTx::finish`].
pub struct WriteTx<'a> {
    tx: libsql::Transaction,
    _lock: MutexGuard<'a, ()>,
}

impl QcDb {
    /// Wait for the write lock and open an immediate transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the transaction cannot be started.
    pub async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let lock = self.write_lock.lock().await;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;
        Ok(WriteTx { tx, _lock: lock })
    }
}

impl WriteTx<'_> {
    /// Commit when `result` is `Ok`, roll back otherwise, and pass it through.
    ///
    /// # Errors
    ///
    /// Returns the error in `result`, or `DatabaseError::LibSql` if the commit
    /// fails.
    pub async fn finish<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.tx.rollback().await {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }
}
