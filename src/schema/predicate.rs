//! Shape predicates for gating conditional union candidates.

use serde_json::Value;

/// True for JSON objects. Arrays and `null` are not objects.
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}
