//! # trace-db
//!
//! libSQL persistence for change-request traceability.
//!
//! Stores change requests, their field-level diffs, and the typed old/new
//! values those diffs point at. Hosts the review engine (approve/decline) and
//! the pending-request query on top of [`service::TraceService`].
//!
//! Every operation runs as a [`UnitOfWork`]: a libSQL transaction held under a
//! per-database gate, so a submission is written all-or-nothing and a read sees
//! one consistent snapshot.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod unit_of_work;

#[cfg(test)]
mod test_support;

pub use unit_of_work::UnitOfWork;

use std::path::Path;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};
use tokio::sync::Mutex;

/// Central database handle.
///
/// Wraps a libSQL database and a single connection. Transactions on that
/// connection are serialized through `gate`.
pub struct TraceDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: Mutex<()>,
}

impl TraceDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Creates the parent directory if needed and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let trace_db = Self {
            db,
            conn,
            gate: Mutex::new(()),
        };
        trace_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(trace_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    ///
    /// Bypasses the gate; meant for tests and maintenance tooling.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Start a write unit of work (`BEGIN IMMEDIATE`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started.
    pub async fn begin_write(&self) -> Result<UnitOfWork<'_>, DatabaseError> {
        self.begin(TransactionBehavior::Immediate).await
    }

    /// Start a read unit of work. All reads inside it see one snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started.
    pub async fn begin_read(&self) -> Result<UnitOfWork<'_>, DatabaseError> {
        self.begin(TransactionBehavior::Deferred).await
    }

    async fn begin(&self, behavior: TransactionBehavior) -> Result<UnitOfWork<'_>, DatabaseError> {
        let guard = self.gate.lock().await;
        let tx = self.conn.transaction_with_behavior(behavior).await?;
        Ok(UnitOfWork::new(tx, guard))
    }
}
