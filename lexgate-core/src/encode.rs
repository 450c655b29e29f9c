//! Encoding: a typed [`ModelInstance`] back into a JSON tree.
//!
//! Unset fields are omitted entirely, explicit nulls become JSON null, and
//! values are emitted under their wire names. Encoding a well-formed
//! instance cannot fail; the setters and the decoder enforce nullability and
//! kind before a value ever reaches this point.

use serde_json::{Map, Value};

use crate::instance::{FieldState, ModelInstance};
use crate::value::FieldValue;

/// Encodes `instance` into its wire representation.
pub fn encode(instance: &ModelInstance) -> Value {
    let mut out = Map::new();
    for field in instance.spec().fields() {
        match instance.state(field.name) {
            FieldState::Unset => {}
            FieldState::Null => {
                out.insert(field.wire_name.to_owned(), Value::Null);
            }
            FieldState::Present(value) => {
                out.insert(field.wire_name.to_owned(), encode_value(value));
            }
        }
    }
    Value::Object(out)
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Str(s) | FieldValue::Symbol(s) => Value::String(s.clone()),
        FieldValue::Int(i) => Value::from(*i),
        // serde_json has no representation for non-finite floats; they can
        // only arrive by sidestepping the checked setters.
        FieldValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
        FieldValue::Any(v) => v.clone(),
        FieldValue::Model(m) => encode(m),
        FieldValue::List(items) => Value::Array(items.iter().map(encode_value).collect()),
        FieldValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), encode_value(item)))
                .collect(),
        ),
    }
}
