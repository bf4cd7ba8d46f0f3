//! Review repository: approve/decline transitions on change requests.
//!
//! A review rewrites exactly four columns of one `change_requests` row:
//! `status`, `reviewed_at`, `reviewed_by` and `comment`. Diffs and values are
//! never touched, and nothing is applied to the target object.

use chrono::Utc;
use libsql::Value;

use trace_core::entities::ChangeRequest;
use trace_core::enums::ReviewResult;
use trace_core::errors::CoreError;
use trace_core::identity::Identity;
use trace_core::review::ReviewDecision;

use crate::error::DatabaseError;
use crate::helpers::opt_text;
use crate::repos::change_request::fetch_change_request;
use crate::service::TraceService;

impl TraceService {
    /// Record a reviewer's decision on a change request.
    ///
    /// Approve sets `APPROVED`, decline sets `DECLINED`. Under the default
    /// policy an already reviewed request is re-stamped with the new decision
    /// (last decision wins).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if the id does not resolve, or
    /// `CoreError::InvalidTransition` under `ReviewPolicy::Strict` when the
    /// request was already reviewed.
    pub async fn review_change_request(
        &self,
        change_request_id: i64,
        decision: &ReviewDecision,
        reviewer: &Identity,
    ) -> Result<ChangeRequest, DatabaseError> {
        self.apply_review(
            change_request_id,
            decision.result,
            reviewer,
            decision.comment.clone(),
        )
        .await
    }

    /// Decline a change request, whatever its current status.
    ///
    /// An administrative override: re-declining or declining an approved
    /// request is not an error under the default policy.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if the request no longer
    /// exists, or `CoreError::InvalidTransition` under `ReviewPolicy::Strict`.
    pub async fn decline_change_request(
        &self,
        request: &ChangeRequest,
        reviewer: &Identity,
        comment: Option<&str>,
    ) -> Result<ChangeRequest, DatabaseError> {
        self.apply_review(
            request.id,
            ReviewResult::Decline,
            reviewer,
            comment.map(str::to_string),
        )
        .await
    }

    async fn apply_review(
        &self,
        change_request_id: i64,
        result: ReviewResult,
        reviewer: &Identity,
        comment: Option<String>,
    ) -> Result<ChangeRequest, DatabaseError> {
        let policy = self.review_config().policy;

        let uow = self.db().begin_write().await?;
        let outcome: Result<_, DatabaseError> = async {
            let mut request = fetch_change_request(&uow, change_request_id)
                .await?
                .ok_or_else(|| CoreError::change_request_not_found(change_request_id))?;

            let outcome = request.record_review(result, reviewer, comment, Utc::now(), policy)?;

            let reviewed_at = request
                .reviewed_at
                .map_or(Value::Null, |ts| Value::Text(ts.to_rfc3339()));
            uow.execute(
                "UPDATE change_requests SET status = ?1, reviewed_at = ?2, reviewed_by = ?3, comment = ?4
                 WHERE id = ?5",
                libsql::params_from_iter(vec![
                    Value::Text(request.status.as_str().to_string()),
                    reviewed_at,
                    opt_text(request.reviewed_by.as_deref()),
                    opt_text(request.comment.as_deref()),
                    Value::Integer(change_request_id),
                ]),
            )
            .await?;

            Ok((request, outcome))
        }
        .await;
        let (request, outcome) = uow.finish(outcome).await?;

        if outcome.overwrote_decision() {
            tracing::warn!(
                change_request_id,
                from = %outcome.from,
                to = %outcome.to,
                reviewed_by = %reviewer.user_id,
                "earlier review decision overwritten"
            );
        } else {
            tracing::info!(
                change_request_id,
                status = %outcome.to,
                reviewed_by = %reviewer.user_id,
                "change request reviewed"
            );
        }
        Ok(request)
    }
}
