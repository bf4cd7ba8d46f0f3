//! Service layer hosting the change-request workflow.
//!
//! `TraceService` wraps `TraceDb` (raw database access) and the review
//! settings. All repo methods are implemented as `impl TraceService`.

use trace_config::{ReviewConfig, TraceConfig};

use crate::TraceDb;
use crate::error::DatabaseError;

/// Orchestrates submissions, reviews, and pending-request queries.
///
/// Every public method follows this protocol:
/// 1. Begin a unit of work (write or read)
/// 2. Execute SQL through the unit of work
/// 3. Commit on success, roll back on any error
pub struct TraceService {
    db: TraceDb,
    review: ReviewConfig,
}

impl TraceService {
    /// Open the database named by `config` and apply its review settings.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the review settings are invalid or the
    /// database cannot be opened.
    pub async fn open(config: &TraceConfig) -> Result<Self, DatabaseError> {
        config.review.validate()?;
        let db = TraceDb::open_local(&config.database.path).await?;
        Ok(Self::from_db(db, config.review.clone()))
    }

    /// Create a service over a local database with default review settings.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = TraceDb::open_local(db_path).await?;
        Ok(Self::from_db(db, ReviewConfig::default()))
    }

    /// Create from an existing `TraceDb`.
    #[must_use]
    pub fn from_db(db: TraceDb, review: ReviewConfig) -> Self {
        Self { db, review }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TraceDb {
        &self.db
    }

    /// Review settings in effect.
    #[must_use]
    pub const fn review_config(&self) -> &ReviewConfig {
        &self.review
    }
}
