//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use uistate_storage::Record;

/// Generate a field name. A small alphabet so records collide often.
pub fn field_name() -> impl Strategy<Value = String> {
    "[a-f]{1,2}".prop_map(String::from)
}

/// Generate a JSON scalar.
pub fn json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
    ]
}

/// Generate a JSON value: a scalar, or a shallow array/object of scalars.
pub fn json_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => json_scalar(),
        1 => prop::collection::vec(json_scalar(), 0..4).prop_map(Value::from),
        1 => prop::collection::btree_map(field_name(), json_scalar(), 0..3)
            .prop_map(|fields| Value::Object(fields.into_iter().collect())),
    ]
}

/// Generate a flat record.
pub fn flat_record() -> impl Strategy<Value = Record> {
    prop::collection::btree_map(field_name(), json_value(), 0..6)
        .prop_map(|fields| fields.into_iter().collect())
}

/// Generate a sequence of partial updates.
pub fn record_updates(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(flat_record(), 0..=max)
}
