//! Gate-held libSQL transactions.

use std::ops::Deref;

use tokio::sync::MutexGuard;

use crate::error::DatabaseError;

/// One transactional unit of work.
///
/// Derefs to `libsql::Connection`, so queries run inside the transaction.
/// Holds the database gate until it is committed, rolled back or dropped;
/// dropping without committing rolls back.
pub struct UnitOfWork<'a> {
    tx: libsql::Transaction,
    gate: MutexGuard<'a, ()>,
}

impl<'a> UnitOfWork<'a> {
    pub(crate) fn new(tx: libsql::Transaction, gate: MutexGuard<'a, ()>) -> Self {
        Self { tx, gate }
    }

    /// Commit the transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        let Self { tx, gate } = self;
        tx.commit().await?;
        drop(gate);
        Ok(())
    }

    /// Roll the transaction back.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the rollback fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        let Self { tx, gate } = self;
        tx.rollback().await?;
        drop(gate);
        Ok(())
    }

    /// Commit on `Ok`, roll back on `Err`, and pass `result` through.
    ///
    /// A failed rollback is logged; the original error is what the caller sees.
    ///
    /// # Errors
    ///
    /// Returns the error carried by `result`, or the commit error.
    pub async fn finish<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = self.rollback().await {
                    tracing::warn!(%rollback_error, %error, "rollback failed after error");
                }
                Err(error)
            }
        }
    }
}

impl Deref for UnitOfWork<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}
