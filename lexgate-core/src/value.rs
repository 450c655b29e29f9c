//! Decoded field values.
//!
//! A [`FieldValue`] is the in-memory form of one field after a successful
//! decode, or the value handed to a setter when building an instance
//! programmatically. Union fields store the winning member's value directly;
//! which member matched is recoverable from the variant.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use crate::instance::ModelInstance;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<FixedOffset>),
    /// Arbitrary JSON carried verbatim, nulls included.
    Any(Value),
    /// Enum value as its raw wire string, recognized or not.
    Symbol(String),
    Model(ModelInstance),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_any(&self) -> Option<&Value> {
        match self {
            FieldValue::Any(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            FieldValue::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&ModelInstance> {
        match self {
            FieldValue::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Short label for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Any(_) => "any",
            FieldValue::Symbol(_) => "symbol",
            FieldValue::Model(_) => "model",
            FieldValue::List(_) => "list",
            FieldValue::Map(_) => "map",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        FieldValue::DateTime(dt)
    }
}
