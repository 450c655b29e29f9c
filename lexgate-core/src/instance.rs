//! Model instances: immutable, tri-state field storage.
//!
//! A [`ModelInstance`] binds a static [`ModelSpec`] to concrete field values.
//! Every field is in one of three states, and the distinction between the
//! first two is load-bearing for encoding (unset fields are omitted, null
//! fields are emitted as JSON null):
//!
//! - unset: the key was absent from the payload, or never set
//! - null: the key was present as JSON null (nullable fields only)
//! - present: the key held a decoded value
//!
//! Instances are observably immutable. The checked setters take `&self` and
//! return a fresh instance with one field changed; the receiver is never
//! modified. The unchecked `put`/`put_null` used by the generated model layer
//! and the decoder consume `self` instead, since those callers are correct by
//! construction and build instances field by field.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::encode::encode;
use crate::error::SchemaError;
use crate::schema::{FieldKind, ModelSpec, Scalar};
use crate::value::FieldValue;

/// Presence state of one field, as observed by callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldState<'a> {
    Unset,
    Null,
    Present(&'a FieldValue),
}

impl FieldState<'_> {
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldState::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldState::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, FieldState::Present(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Null,
    Value(FieldValue),
}

/// A concrete value of some model type.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    spec: &'static ModelSpec,
    slots: BTreeMap<&'static str, Slot>,
}

impl PartialEq for ModelInstance {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.spec, other.spec) && self.slots == other.slots
    }
}

impl ModelInstance {
    /// An instance with every field unset.
    pub fn new(spec: &'static ModelSpec) -> Self {
        ModelInstance {
            spec,
            slots: BTreeMap::new(),
        }
    }

    pub fn spec(&self) -> &'static ModelSpec {
        self.spec
    }

    /// The tri-state of a field. Unknown field names read as unset.
    pub fn state(&self, field: &str) -> FieldState<'_> {
        match self.slots.get(field) {
            None => FieldState::Unset,
            Some(Slot::Null) => FieldState::Null,
            Some(Slot::Value(v)) => FieldState::Present(v),
        }
    }

    /// The field's value, if present (not null, not unset).
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        match self.slots.get(field) {
            Some(Slot::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Returns a new instance with `field` set to `value`, checking that the
    /// value conforms to the field's declared kind. Scalar widenings applied
    /// by the decoder (int into float, string into enum symbol) are applied
    /// here too, so round-trips through the checked API stay exact.
    pub fn with_value(&self, field: &str, value: FieldValue) -> Result<Self, SchemaError> {
        let field_spec = self.spec.field(field).ok_or_else(|| SchemaError::UnknownField {
            model: self.spec.name().to_owned(),
            field: field.to_owned(),
        })?;
        let conformed = conform(&field_spec.kind, &value).ok_or_else(|| SchemaError::KindMismatch {
            field: field.to_owned(),
            expected: field_spec.kind.to_string(),
        })?;
        let mut next = self.clone();
        next.slots.insert(field_spec.name, Slot::Value(conformed));
        Ok(next)
    }

    /// Returns a new instance with `field` set to explicit null. Only legal
    /// for nullable fields.
    pub fn with_null(&self, field: &str) -> Result<Self, SchemaError> {
        let field_spec = self.spec.field(field).ok_or_else(|| SchemaError::UnknownField {
            model: self.spec.name().to_owned(),
            field: field.to_owned(),
        })?;
        if !field_spec.nullable {
            return Err(SchemaError::NotNullable {
                field: field.to_owned(),
            });
        }
        let mut next = self.clone();
        next.slots.insert(field_spec.name, Slot::Null);
        Ok(next)
    }

    /// Returns a new instance with `field` back in the unset state.
    pub fn cleared(&self, field: &str) -> Result<Self, SchemaError> {
        let field_spec = self.spec.field(field).ok_or_else(|| SchemaError::UnknownField {
            model: self.spec.name().to_owned(),
            field: field.to_owned(),
        })?;
        let mut next = self.clone();
        next.slots.remove(field_spec.name);
        Ok(next)
    }

    /// Unchecked set, for the decoder and the generated model layer. The
    /// caller guarantees the field exists and the value matches its kind.
    pub(crate) fn put(mut self, field: &'static str, value: FieldValue) -> Self {
        debug_assert!(self.spec.field(field).is_some(), "unknown field `{field}`");
        self.slots.insert(field, Slot::Value(value));
        self
    }

    /// Unchecked explicit null, for the decoder and the generated model layer.
    pub(crate) fn put_null(mut self, field: &'static str) -> Self {
        debug_assert!(
            self.spec.field(field).is_some_and(|f| f.nullable),
            "field `{field}` is not nullable"
        );
        self.slots.insert(field, Slot::Null);
        self
    }
}

/// Serializes as the encoded wire form, so instances can be handed straight
/// to an HTTP client's JSON body builder.
impl Serialize for ModelInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode(self).serialize(serializer)
    }
}

/// Checks `value` against `kind`, applying the decoder's widenings. Returns
/// the (possibly coerced) value, or `None` when the value does not conform.
fn conform(kind: &FieldKind, value: &FieldValue) -> Option<FieldValue> {
    match (kind, value) {
        (FieldKind::Scalar(Scalar::String), FieldValue::Str(_))
        | (FieldKind::Scalar(Scalar::Int), FieldValue::Int(_))
        | (FieldKind::Scalar(Scalar::Float), FieldValue::Float(_))
        | (FieldKind::Scalar(Scalar::Bool), FieldValue::Bool(_))
        | (FieldKind::Scalar(Scalar::DateTime), FieldValue::DateTime(_))
        | (FieldKind::Scalar(Scalar::Any), FieldValue::Any(_))
        | (FieldKind::Enum(_), FieldValue::Symbol(_)) => Some(value.clone()),
        (FieldKind::Scalar(Scalar::Float), FieldValue::Int(i)) => {
            Some(FieldValue::Float(*i as f64))
        }
        (FieldKind::Enum(_), FieldValue::Str(s)) => Some(FieldValue::Symbol(s.clone())),
        (FieldKind::Model(spec), FieldValue::Model(m)) if std::ptr::eq(m.spec(), spec()) => {
            Some(value.clone())
        }
        (FieldKind::List(inner), FieldValue::List(items)) => items
            .iter()
            .map(|item| conform(inner, item))
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::List),
        (FieldKind::Map(inner), FieldValue::Map(entries)) => entries
            .iter()
            .map(|(key, item)| conform(inner, item).map(|v| (key.clone(), v)))
            .collect::<Option<BTreeMap<_, _>>>()
            .map(FieldValue::Map),
        (FieldKind::Union(members), value) => {
            members.iter().find_map(|member| conform(member, value))
        }
        _ => None,
    }
}
