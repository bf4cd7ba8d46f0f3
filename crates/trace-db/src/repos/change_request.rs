//! Change request repository: atomic submission and reads.

use chrono::Utc;
use libsql::Value;

use trace_core::entities::{ChangeRequest, ChangeRequestDetail, NewChangeRequest};
use trace_core::enums::{ChangeStatus, ObjectType};
use trace_core::errors::CoreError;
use trace_core::identity::Identity;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, opt_integer, parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::repos::diff::{insert_diff, list_diffs};
use crate::service::TraceService;

pub(crate) const SELECT_COLS: &str = "id, created_at, created_by, object_type, object_id, change_type, \
     status, reviewed_at, reviewed_by, comment";

pub(crate) fn row_to_change_request(row: &libsql::Row) -> Result<ChangeRequest, DatabaseError> {
    Ok(ChangeRequest {
        id: row.get::<i64>(0)?,
        created_at: parse_datetime(&row.get::<String>(1)?)?,
        created_by: row.get::<String>(2)?,
        object_type: parse_enum(&row.get::<String>(3)?)?,
        object_id: row.get::<Option<i64>>(4)?,
        change_type: parse_enum(&row.get::<String>(5)?)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        reviewed_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
        reviewed_by: get_opt_string(row, 8)?,
        comment: row.get::<Option<String>>(9)?,
    })
}

/// Fetch one change request header, `None` if the id does not resolve.
pub(crate) async fn fetch_change_request(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Option<ChangeRequest>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM change_requests WHERE id = ?1");
    let mut rows = conn.query(&sql, [id]).await?;
    rows.next()
        .await?
        .map(|row| row_to_change_request(&row))
        .transpose()
}

async fn insert_change_request(
    conn: &libsql::Connection,
    submitter: &Identity,
    request: &NewChangeRequest,
) -> Result<ChangeRequestDetail, DatabaseError> {
    let now = Utc::now();

    conn.execute(
        "INSERT INTO change_requests (created_at, created_by, object_type, object_id, change_type, status)
         VALUES (?1, ?2, ?3, ?4, ?5, 'pending')",
        libsql::params_from_iter(vec![
            Value::Text(now.to_rfc3339()),
            Value::Text(submitter.user_id.clone()),
            Value::Text(request.object_type().as_str().to_string()),
            opt_integer(request.object_id()),
            Value::Text(request.change_type().as_str().to_string()),
        ]),
    )
    .await?;
    let id = conn.last_insert_rowid();

    let mut diffs = Vec::with_capacity(request.diffs().len());
    for diff in request.diffs() {
        diffs.push(insert_diff(conn, id, diff).await?);
    }

    let header = ChangeRequest {
        id,
        created_at: now,
        created_by: submitter.user_id.clone(),
        object_type: request.object_type(),
        object_id: request.object_id(),
        change_type: request.change_type(),
        status: ChangeStatus::Pending,
        reviewed_at: None,
        reviewed_by: None,
        comment: None,
    };

    Ok(ChangeRequestDetail {
        request: header,
        diffs,
    })
}

impl TraceService {
    /// Submit a change request with all of its diffs and values.
    ///
    /// The header, every typed value row and every diff row are written in
    /// one unit of work; on any failure nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any INSERT fails.
    pub async fn submit_change_request(
        &self,
        submitter: &Identity,
        request: &NewChangeRequest,
    ) -> Result<ChangeRequestDetail, DatabaseError> {
        let uow = self.db().begin_write().await?;
        let result = insert_change_request(&uow, submitter, request).await;
        let detail = uow.finish(result).await?;

        tracing::info!(
            change_request_id = detail.request.id,
            object_type = %detail.request.object_type,
            change_type = %detail.request.change_type,
            diffs = detail.diffs.len(),
            submitted_by = %submitter.user_id,
            "change request submitted"
        );
        Ok(detail)
    }

    /// Get a change request header by ID.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if the request does not exist.
    pub async fn get_change_request(&self, id: i64) -> Result<ChangeRequest, DatabaseError> {
        let uow = self.db().begin_read().await?;
        let result = fetch_change_request(&uow, id).await;
        uow.finish(result)
            .await?
            .ok_or_else(|| CoreError::change_request_not_found(id).into())
    }

    /// Get a change request with its diffs, each value decoded from the table
    /// its `data_type` selects.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if the request does not exist,
    /// or `DatabaseError::InvalidState` if a diff points at a missing value.
    pub async fn get_change_request_detail(
        &self,
        id: i64,
    ) -> Result<ChangeRequestDetail, DatabaseError> {
        let uow = self.db().begin_read().await?;
        let result: Result<_, DatabaseError> = async {
            let request = fetch_change_request(&uow, id)
                .await?
                .ok_or_else(|| CoreError::change_request_not_found(id))?;
            let diffs = list_diffs(&uow, id).await?;
            Ok(ChangeRequestDetail { request, diffs })
        }
        .await;
        uow.finish(result).await
    }

    /// Review history of one object, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_change_requests_for_object(
        &self,
        object_type: ObjectType,
        object_id: i64,
        limit: u32,
    ) -> Result<Vec<ChangeRequest>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM change_requests \
             WHERE object_type = ?1 AND object_id = ?2 \
             ORDER BY id DESC LIMIT ?3"
        );

        let uow = self.db().begin_read().await?;
        let result: Result<_, DatabaseError> = async {
            let mut rows = uow
                .query(
                    &sql,
                    libsql::params![object_type.as_str(), object_id, i64::from(limit)],
                )
                .await?;
            let mut items = Vec::new();
            while let Some(row) = rows.next().await? {
                items.push(row_to_change_request(&row)?);
            }
            Ok(items)
        }
        .await;
        uow.finish(result).await
    }
}
