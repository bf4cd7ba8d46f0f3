//! Shared test utilities for trace-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use trace_config::ReviewConfig;
    use trace_core::entities::{ChangeRequest, NewChangeRequest, NewDiff};
    use trace_core::enums::{ChangeType, ContentType, ObjectType, ReviewPolicy};
    use trace_core::identity::Identity;
    use trace_core::values::DiffValue;

    use crate::TraceDb;
    use crate::service::TraceService;

    /// In-memory service with default review settings.
    pub async fn test_service() -> TraceService {
        TraceService::new_local(":memory:").await.unwrap()
    }

    /// In-memory service with the given review policy.
    pub async fn test_service_with_policy(policy: ReviewPolicy) -> TraceService {
        let db = TraceDb::open_local(":memory:").await.unwrap();
        TraceService::from_db(
            db,
            ReviewConfig {
                policy,
                ..ReviewConfig::default()
            },
        )
    }

    /// In-memory service with a non-default pending page size.
    pub async fn test_service_with_page_limit(default_page_limit: u32) -> TraceService {
        let db = TraceDb::open_local(":memory:").await.unwrap();
        TraceService::from_db(
            db,
            ReviewConfig {
                default_page_limit,
                ..ReviewConfig::default()
            },
        )
    }

    pub fn submitter() -> Identity {
        Identity::new("user-submitter")
    }

    pub fn reviewer() -> Identity {
        Identity::new("user-reviewer").with_display_name("Reviewer")
    }

    /// A one-diff request renaming object 1 (or creating a new object).
    pub fn name_change(object_type: ObjectType, change_type: ChangeType) -> NewChangeRequest {
        let object_id = change_type.requires_object_id().then_some(1);
        let value = match change_type {
            ChangeType::Create => DiffValue::str(None, Some("created")),
            ChangeType::Update => DiffValue::str(Some("before"), Some("after")),
            ChangeType::Delete => DiffValue::str(Some("deleted"), None),
        };
        let diff = NewDiff::new(
            object_id,
            ContentType::from(object_type),
            "name",
            change_type,
            value,
        )
        .unwrap();
        NewChangeRequest::new(object_type, object_id, change_type, vec![diff]).unwrap()
    }

    /// Submit a `name_change` and return the stored header.
    pub async fn submit_named(
        svc: &TraceService,
        object_type: ObjectType,
        change_type: ChangeType,
    ) -> ChangeRequest {
        svc.submit_change_request(&submitter(), &name_change(object_type, change_type))
            .await
            .unwrap()
            .request
    }
}
