use crate::build::build_filter;
use crate::serialize::serialize_filter;
use serde_json::json;

#[test]
fn neutral_filter_serializes_to_the_empty_object() {
    let filter = build_filter(&json!({})).expect("must build");
    assert_eq!(serialize_filter(&filter), json!({}));
}

#[test]
fn comparator_serializes_to_field_operator_value() {
    let filter = build_filter(&json!({"tag": "test"})).expect("must build");
    assert_eq!(serialize_filter(&filter), json!({"tag": {"$eq": "test"}}));
}

#[test]
fn aggregator_children_are_emitted_in_declaration_order() {
    let raw = json!({
        "$and": [
            {"department": {"$eq": "accounts"}},
            {"my_score": {"$gt": 0.5}},
        ]
    });
    let filter = build_filter(&raw).expect("must build");
    assert_eq!(
        serialize_filter(&filter),
        json!({
            "$and": [
                {"department": {"$eq": "accounts"}},
                {"my_score": {"$gt": 0.5}},
            ]
        })
    );
}

#[test]
fn round_trip_preserves_tree_equality() {
    let inputs = [
        json!({}),
        json!({"tag": "test"}),
        json!({"my_score": {"$gt": 0.5}}),
        json!({"department": {"$in": ["finance", "compliance"]}}),
        json!({"score": {"$gt": 1, "$lt": 9}}),
        json!({"tag": "test", "department": {"$neq": "hr"}}),
        json!({
            "$and": [
                {"$or": [
                    {"department": {"$eq": "accounts"}},
                    {"department": {"$in": ["finance", "compliance"]}},
                ]},
                {"tag": {"$eq": "test"}},
                {"my_score": {"$gt": 0.5}},
            ]
        }),
    ];

    for raw in inputs {
        let first = build_filter(&raw).expect("must build");
        let rebuilt = build_filter(&serialize_filter(&first)).expect("must rebuild");
        assert_eq!(rebuilt, first, "round-trip changed the tree for {raw}");
    }
}

#[test]
fn implicit_forms_serialize_to_their_explicit_spelling() {
    let filter = build_filter(&json!({"score": {"$gt": 1, "$lt": 9}})).expect("must build");
    assert_eq!(
        serialize_filter(&filter),
        json!({"$and": [
            {"score": {"$gt": 1}},
            {"score": {"$lt": 9}},
        ]})
    );
}
