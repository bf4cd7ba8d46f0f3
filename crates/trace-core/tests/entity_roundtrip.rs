//! Serde roundtrip and JsonSchema validation tests for the entity types.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use trace_core::entities::*;
use trace_core::enums::*;
use trace_core::identity::Identity;
use trace_core::review::ReviewDecision;
use trace_core::values::DiffValue;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn reviewed_request() -> ChangeRequest {
    let now = Utc::now();
    ChangeRequest {
        id: 42,
        created_at: now,
        created_by: "user-submitter".into(),
        object_type: ObjectType::Schema,
        object_id: Some(3),
        change_type: ChangeType::Update,
        status: ChangeStatus::Declined,
        reviewed_at: Some(now),
        reviewed_by: Some("user-reviewer".into()),
        comment: Some("naming clash with existing schema".into()),
    }
}

fn diff(value: DiffValue) -> Diff {
    Diff {
        entry: DiffEntry {
            id: 1,
            change_request_id: 42,
            object_id: Some(3),
            content_type: ContentType::Attribute,
            field_name: "max_length".into(),
            change_type: ChangeType::Update,
            data_type: value.data_type(),
            value_id: 7,
        },
        value,
    }
}

roundtrip_and_validate!(change_request_roundtrip, ChangeRequest, reviewed_request());

roundtrip_and_validate!(
    pending_create_roundtrip,
    ChangeRequest,
    ChangeRequest {
        id: 1,
        created_at: Utc::now(),
        created_by: "user-submitter".into(),
        object_type: ObjectType::Entity,
        object_id: None,
        change_type: ChangeType::Create,
        status: ChangeStatus::Pending,
        reviewed_at: None,
        reviewed_by: None,
        comment: None,
    }
);

roundtrip_and_validate!(
    detail_roundtrip,
    ChangeRequestDetail,
    ChangeRequestDetail {
        request: reviewed_request(),
        diffs: vec![
            diff(DiffValue::int(Some(64), Some(128))),
            diff(DiffValue::str(Some("Person"), Some("Human"))),
            diff(DiffValue::bool(None, Some(true))),
            diff(DiffValue::float(Some(0.25), None)),
            diff(DiffValue::date(
                NaiveDate::from_ymd_opt(1999, 12, 31),
                NaiveDate::from_ymd_opt(2000, 1, 1)
            )),
            diff(DiffValue::date_time(None, Some(Utc::now()))),
        ],
    }
);

roundtrip_and_validate!(
    new_request_roundtrip,
    NewChangeRequest,
    NewChangeRequest::new(
        ObjectType::Entity,
        Some(11),
        ChangeType::Delete,
        vec![
            NewDiff::new(
                Some(11),
                ContentType::Entity,
                "nickname",
                ChangeType::Delete,
                DiffValue::str(Some("Bob"), None),
            )
            .unwrap()
        ],
    )
    .unwrap()
);

roundtrip_and_validate!(
    identity_roundtrip,
    Identity,
    Identity::new("user-1").with_display_name("Reviewer One")
);

roundtrip_and_validate!(
    decision_roundtrip,
    ReviewDecision,
    ReviewDecision::approve("fine")
);
