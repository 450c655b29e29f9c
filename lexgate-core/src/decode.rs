//! Decoding: a loosely-typed JSON tree into a typed [`ModelInstance`].
//!
//! This is the only place where untrusted wire payloads become rich typed
//! values. Decoding is pure and deterministic, takes the payload and the
//! model descriptor, and either returns a complete instance or a single
//! [`DecodeError`]; no partial instance ever escapes.
//!
//! Forward compatibility is deliberate in two places: unknown object keys
//! are ignored, and enum strings outside the declared member set decode to
//! an unrecognized symbol that re-encodes verbatim.

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeErrorKind, FieldPath};
use crate::instance::ModelInstance;
use crate::schema::{FieldKind, ModelSpec, Presence, Scalar};
use crate::value::FieldValue;

/// Nesting allowed across nested models, lists, maps and union attempts.
/// Generated model graphs are shallow; hitting this means a cyclic or
/// adversarial descriptor table.
pub const MAX_DECODE_DEPTH: usize = 64;

/// Decodes `payload` against `spec`.
pub fn decode(payload: &Value, spec: &'static ModelSpec) -> Result<ModelInstance, DecodeError> {
    let mut path = FieldPath::new();
    match payload {
        Value::Object(object) => decode_model(object, spec, &mut path, 0),
        other => Err(DecodeError::new(
            &path,
            DecodeErrorKind::TypeMismatch {
                expected: format!("model({})", spec.name()),
                actual: json_type_name(other).to_owned(),
            },
        )),
    }
}

fn decode_model(
    object: &Map<String, Value>,
    spec: &'static ModelSpec,
    path: &mut FieldPath,
    depth: usize,
) -> Result<ModelInstance, DecodeError> {
    if depth > MAX_DECODE_DEPTH {
        return Err(DecodeError::new(path, DecodeErrorKind::DepthLimitExceeded));
    }
    let mut instance = ModelInstance::new(spec);
    for field in spec.fields() {
        match object.get(field.wire_name) {
            // Absent key. Only a required non-nullable field insists on
            // presence; everything else stays unset, which is distinct from
            // set-to-null.
            None => {
                if field.presence == Presence::Required && !field.nullable {
                    path.push_field(field.wire_name);
                    let err = DecodeError::new(path, DecodeErrorKind::MissingRequiredField);
                    path.pop();
                    return Err(err);
                }
            }
            Some(Value::Null) => {
                if field.nullable {
                    instance = instance.put_null(field.name);
                } else {
                    path.push_field(field.wire_name);
                    let err = DecodeError::new(path, DecodeErrorKind::UnexpectedNull);
                    path.pop();
                    return Err(err);
                }
            }
            Some(value) => {
                path.push_field(field.wire_name);
                let decoded = decode_kind(value, &field.kind, path, depth + 1)?;
                path.pop();
                instance = instance.put(field.name, decoded);
            }
        }
    }
    Ok(instance)
}

fn decode_kind(
    value: &Value,
    kind: &FieldKind,
    path: &mut FieldPath,
    depth: usize,
) -> Result<FieldValue, DecodeError> {
    if depth > MAX_DECODE_DEPTH {
        return Err(DecodeError::new(path, DecodeErrorKind::DepthLimitExceeded));
    }
    match kind {
        FieldKind::Scalar(scalar) => decode_scalar(value, *scalar, kind, path),
        FieldKind::Enum(_) => match value {
            // Membership is not enforced: unknown members stay raw symbols.
            Value::String(s) => Ok(FieldValue::Symbol(s.clone())),
            other => mismatch(path, kind, other),
        },
        FieldKind::Model(spec) => match value {
            Value::Object(object) => {
                decode_model(object, spec(), path, depth + 1).map(FieldValue::Model)
            }
            other => mismatch(path, kind, other),
        },
        FieldKind::List(inner) => match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    path.push_index(index);
                    let decoded = decode_kind(item, inner, path, depth + 1)?;
                    path.pop();
                    out.push(decoded);
                }
                Ok(FieldValue::List(out))
            }
            other => mismatch(path, kind, other),
        },
        FieldKind::Map(inner) => match value {
            Value::Object(entries) => {
                let mut out = std::collections::BTreeMap::new();
                for (key, item) in entries {
                    path.push_key(key);
                    let decoded = decode_kind(item, inner, path, depth + 1)?;
                    path.pop();
                    out.insert(key.clone(), decoded);
                }
                Ok(FieldValue::Map(out))
            }
            other => mismatch(path, kind, other),
        },
        FieldKind::Union(members) => {
            // First member that decodes wins; failed attempts may leave path
            // segments behind, so restore before each try.
            let mark = path.len();
            for member in members {
                match decode_kind(value, member, path, depth + 1) {
                    Ok(decoded) => return Ok(decoded),
                    Err(_) => path.truncate(mark),
                }
            }
            Err(DecodeError::new(
                path,
                DecodeErrorKind::NoUnionMemberMatched {
                    tried: members.iter().map(|m| m.to_string()).collect(),
                },
            ))
        }
    }
}

fn decode_scalar(
    value: &Value,
    scalar: Scalar,
    kind: &FieldKind,
    path: &mut FieldPath,
) -> Result<FieldValue, DecodeError> {
    match scalar {
        Scalar::String => match value {
            Value::String(s) => Ok(FieldValue::Str(s.clone())),
            other => mismatch(path, kind, other),
        },
        Scalar::Int => match value.as_i64() {
            Some(i) => Ok(FieldValue::Int(i)),
            None => mismatch(path, kind, value),
        },
        // Integers widen into floats; the reverse is a mismatch.
        Scalar::Float => match value.as_f64() {
            Some(f) => Ok(FieldValue::Float(f)),
            None => mismatch(path, kind, value),
        },
        Scalar::Bool => match value {
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            other => mismatch(path, kind, other),
        },
        Scalar::DateTime => match value {
            Value::String(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(parsed) => Ok(FieldValue::DateTime(parsed)),
                Err(_) => Err(DecodeError::new(
                    path,
                    DecodeErrorKind::InvalidDateTime { raw: raw.clone() },
                )),
            },
            other => mismatch(path, kind, other),
        },
        Scalar::Any => Ok(FieldValue::Any(value.clone())),
    }
}

fn mismatch(
    path: &FieldPath,
    expected: &FieldKind,
    actual: &Value,
) -> Result<FieldValue, DecodeError> {
    Err(DecodeError::new(
        path,
        DecodeErrorKind::TypeMismatch {
            expected: expected.to_string(),
            actual: json_type_name(actual).to_owned(),
        },
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
