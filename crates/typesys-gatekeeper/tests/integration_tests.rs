//! Integration tests for the Gatekeeper

use serde_json::json;
use typesys_domain::{EndPosition, PropagateTags, RelationshipCategory, TypesDef};
use typesys_gatekeeper::{
    Gatekeeper, PropagationPolicy, RejectionReason, ValidationConfig, ValidationStatus,
};

/// Helper to decode a bundle as it would arrive from a registry export
fn create_test_bundle() -> TypesDef {
    serde_json::from_value(json!({
        "entityDefs": [
            {"category": "ENTITY", "name": "Table"},
            {"category": "ENTITY", "name": "Column"}
        ],
        "relationshipDefs": [
            {
                "category": "RELATIONSHIP",
                "name": "table_columns",
                "relationshipCategory": "COMPOSITION",
                "propagateTags": "NONE",
                "endDef1": {"type": "Table", "name": "columns", "cardinality": "SET", "isContainer": true},
                "endDef2": {"type": "Column", "name": "table", "cardinality": "SINGLE"}
            },
            {
                "name": "column_lineage",
                "relationshipCategory": "AGGREGATION",
                "propagateTags": "BOTH",
                "attributeDefs": [{"name": "since", "typeName": "date"}],
                "endDef1": {"type": "Column", "name": "derived", "cardinality": "SET", "isContainer": true},
                "endDef2": {"type": "Column", "name": "sources", "cardinality": "SET"}
            },
            {
                "name": "table_owner",
                "relationshipCategory": "ASSOCIATION",
                "endDef1": {"type": "Table", "name": "owner", "cardinality": "LIST"}
            }
        ]
    }))
    .unwrap()
}

#[test]
fn test_validate_bundle_with_defaults() {
    let results = Gatekeeper::default_config().validate_types(&create_test_bundle());

    let names: Vec<&str> = results.iter().map(|r| r.type_name.as_str()).collect();
    assert_eq!(names, vec!["table_columns", "column_lineage", "table_owner"]);

    assert_eq!(results[0].status, ValidationStatus::Accepted);
    assert_eq!(results[1].status, ValidationStatus::Accepted);
    assert_eq!(
        results[2].reasons,
        vec![
            RejectionReason::ListCardinalityOnEnd(EndPosition::One),
            RejectionReason::MissingEnd(EndPosition::Two),
        ]
    );
}

#[test]
fn test_validate_bundle_with_warn_policy() {
    let config = ValidationConfig::from_toml("propagation_policy = \"warn\"").unwrap();
    let results = Gatekeeper::new(config).validate_types(&create_test_bundle());

    assert!(results[1].is_accepted());
    assert_eq!(
        results[1].warnings,
        vec![RejectionReason::UpwardPropagation {
            category: RelationshipCategory::Aggregation,
            propagate_tags: PropagateTags::Both,
            container: EndPosition::One,
        }]
    );
}

#[test]
fn test_strict_rejects_upward_propagation() {
    let gatekeeper = Gatekeeper::new(ValidationConfig::strict());
    let bundle = create_test_bundle();
    let lineage = bundle.relationship_def("column_lineage").unwrap();

    let err = gatekeeper.check(lineage).unwrap_err();
    assert!(err.to_string().contains("column_lineage"));
    assert!(err.to_string().contains("BOTH"));
    assert_eq!(gatekeeper.config().propagation_policy, PropagationPolicy::Reject);
}

#[test]
fn test_permissive_still_requires_ends() {
    let results = Gatekeeper::new(ValidationConfig::permissive()).validate_types(&create_test_bundle());

    assert!(results[0].is_accepted());
    assert!(results[1].is_accepted());
    assert_eq!(
        results[2].reasons,
        vec![RejectionReason::MissingEnd(EndPosition::Two)]
    );
}
