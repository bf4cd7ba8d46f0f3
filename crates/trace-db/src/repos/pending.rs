//! Pending-request query.
//!
//! Counts pending rows per consulted group, lets `plan_window` decide which
//! range of each group the page covers, then runs one indexed range query per
//! contributing group. All of it happens inside one read unit of work, so a
//! request cannot show up as pending on one query and reviewed on the next.

use trace_core::entities::ChangeRequest;
use trace_core::enums::ObjectType;
use trace_core::pending::{GroupSlice, PendingQuery, plan_window};

use crate::error::DatabaseError;
use crate::helpers::sql_count;
use crate::repos::change_request::{SELECT_COLS, row_to_change_request};
use crate::service::TraceService;

async fn count_group(
    conn: &libsql::Connection,
    object_type: ObjectType,
) -> Result<u64, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM change_requests WHERE status = 'pending' AND object_type = ?1",
            [object_type.as_str()],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let count = row.get::<i64>(0)?;
    Ok(u64::try_from(count).unwrap_or_default())
}

async fn count_groups(
    conn: &libsql::Connection,
    groups: &[ObjectType],
) -> Result<Vec<(ObjectType, u64)>, DatabaseError> {
    let mut counts = Vec::with_capacity(groups.len());
    for &object_type in groups {
        counts.push((object_type, count_group(conn, object_type).await?));
    }
    Ok(counts)
}

async fn fetch_slice(
    conn: &libsql::Connection,
    slice: GroupSlice,
    out: &mut Vec<ChangeRequest>,
) -> Result<(), DatabaseError> {
    let sql = format!(
        "SELECT {SELECT_COLS} FROM change_requests \
         WHERE status = 'pending' AND object_type = ?1 \
         ORDER BY id DESC LIMIT ?2 OFFSET ?3"
    );
    let mut rows = conn
        .query(
            &sql,
            libsql::params![
                slice.object_type.as_str(),
                sql_count(slice.limit),
                sql_count(slice.offset)
            ],
        )
        .await?;
    while let Some(row) = rows.next().await? {
        out.push(row_to_change_request(&row)?);
    }
    Ok(())
}

impl TraceService {
    /// Pending change requests as one ordered, sliceable sequence.
    ///
    /// Schema requests come before entity requests, each group newest first.
    /// `query.limit` falls back to the configured default page size;
    /// `return_all` ignores both limit and offset. An offset past the end
    /// yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn query_pending(
        &self,
        query: &PendingQuery,
    ) -> Result<Vec<ChangeRequest>, DatabaseError> {
        let window = query.window(self.review_config().default_page_limit);

        let uow = self.db().begin_read().await?;
        let result: Result<_, DatabaseError> = async {
            let counts = count_groups(&uow, &query.groups()).await?;
            let plan = plan_window(&counts, window);
            tracing::debug!(?counts, ?window, ?plan, "pending window planned");

            let mut page = Vec::new();
            for slice in plan {
                fetch_slice(&uow, slice, &mut page).await?;
            }
            Ok(page)
        }
        .await;
        uow.finish(result).await
    }

    /// Number of pending requests, optionally restricted to one group.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_pending(
        &self,
        object_type: Option<ObjectType>,
    ) -> Result<u64, DatabaseError> {
        let groups = PendingQuery {
            object_type,
            ..PendingQuery::default()
        }
        .groups();

        let uow = self.db().begin_read().await?;
        let result = count_groups(&uow, &groups).await;
        let counts = uow.finish(result).await?;
        Ok(counts.iter().map(|&(_, count)| count).sum())
    }
}
