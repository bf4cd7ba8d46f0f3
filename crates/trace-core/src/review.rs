//! Review engine rules.
//!
//! Applies a reviewer's decision to an in-memory `ChangeRequest`. Persistence
//! lives in `trace-db`; this module only decides what the four audit fields
//! become.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ChangeRequest;
use crate::enums::{ChangeStatus, ReviewPolicy, ReviewResult};
use crate::errors::CoreError;
use crate::identity::Identity;

/// A reviewer's decision on one change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewDecision {
    pub result: ReviewResult,
    pub comment: Option<String>,
}

impl ReviewDecision {
    #[must_use]
    pub fn approve(comment: impl Into<String>) -> Self {
        Self {
            result: ReviewResult::Approve,
            comment: Some(comment.into()),
        }
    }

    #[must_use]
    pub fn decline(comment: impl Into<String>) -> Self {
        Self {
            result: ReviewResult::Decline,
            comment: Some(comment.into()),
        }
    }
}

/// What a review did to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub from: ChangeStatus,
    pub to: ChangeStatus,
}

impl ReviewOutcome {
    /// True when the request already carried a decision that got replaced.
    #[must_use]
    pub const fn overwrote_decision(self) -> bool {
        self.from.is_terminal()
    }
}

impl ChangeRequest {
    /// Record a review decision on this request.
    ///
    /// Sets `status`, `reviewed_at`, `reviewed_by` and `comment`; nothing else
    /// is touched. `reviewed_at` is never earlier than `created_at`.
    ///
    /// Under `ReviewPolicy::Overwrite` an already reviewed request is simply
    /// re-stamped with the new decision.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` under `ReviewPolicy::Strict` when
    /// the request is no longer pending.
    pub fn record_review(
        &mut self,
        result: ReviewResult,
        reviewer: &Identity,
        comment: Option<String>,
        now: DateTime<Utc>,
        policy: ReviewPolicy,
    ) -> Result<ReviewOutcome, CoreError> {
        let from = self.status;
        let to = result.target_status();

        if policy == ReviewPolicy::Strict && !from.can_transition_to(to) {
            return Err(CoreError::InvalidTransition {
                entity_type: "change_request".to_string(),
                id: self.id.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        self.status = to;
        self.reviewed_at = Some(now.max(self.created_at));
        self.reviewed_by = Some(reviewer.user_id.clone());
        self.comment = comment;

        Ok(ReviewOutcome { from, to })
    }
}
