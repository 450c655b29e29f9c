//! Error types for the marshaling layer.
//!
//! Decoding is all-or-nothing: the first anomaly aborts the whole decode and
//! is reported as a [`DecodeError`] carrying the offending field path in
//! dot/bracket notation (`sandbox.cpu`, `parts[2].etag`) plus a structured
//! [`DecodeErrorKind`]. Unknown object keys and unrecognized enum values are
//! deliberately *not* errors; servers grow their payloads before clients
//! update.
//!
//! [`SchemaError`] covers misuse of the checked instance setters (unknown
//! field, wrong value kind, null on a non-nullable field). The generated
//! model layer never produces these.

use std::fmt;

use thiserror::Error;

/// A decode failure, located by field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("decode failed at `{path}`: {kind}")]
pub struct DecodeError {
    /// Wire-name path to the offending value, e.g. `sandbox.cpu` or
    /// `items[2].key`. The document root is `$`.
    pub path: String,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub(crate) fn new(path: &FieldPath, kind: DecodeErrorKind) -> Self {
        DecodeError {
            path: path.render(),
            kind,
        }
    }
}

/// What went wrong during a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A required, non-nullable field was absent from the payload.
    MissingRequiredField,
    /// A non-nullable field was present as JSON null.
    UnexpectedNull,
    /// The JSON value's shape does not match the declared field kind.
    TypeMismatch { expected: String, actual: String },
    /// A datetime string failed to parse as RFC 3339.
    InvalidDateTime { raw: String },
    /// A value matched none of the union's member kinds, in declared order.
    NoUnionMemberMatched { tried: Vec<String> },
    /// Nesting exceeded the recursion guard. Model graphs are expected to be
    /// acyclic, but nothing in the descriptor tables enforces that.
    DepthLimitExceeded,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::MissingRequiredField => {
                write!(f, "missing required field")
            }
            DecodeErrorKind::UnexpectedNull => {
                write!(f, "null is not a legal value for this field")
            }
            DecodeErrorKind::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {expected}, got {actual}")
            }
            DecodeErrorKind::InvalidDateTime { raw } => {
                write!(f, "invalid RFC 3339 datetime: `{raw}`")
            }
            DecodeErrorKind::NoUnionMemberMatched { tried } => {
                write!(f, "no union member matched (tried {})", tried.join(", "))
            }
            DecodeErrorKind::DepthLimitExceeded => {
                write!(f, "nesting exceeds the decode depth limit")
            }
        }
    }
}

/// Misuse of the checked [`ModelInstance`](crate::instance::ModelInstance)
/// setters. These indicate a caller bug, not a bad payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("model `{model}` has no field named `{field}`")]
    UnknownField { model: String, field: String },
    #[error("field `{field}` is not nullable")]
    NotNullable { field: String },
    #[error("value does not conform to field `{field}` (expected {expected})")]
    KindMismatch { field: String, expected: String },
}

/// Path under construction while a decode walks the payload.
///
/// Segments are pushed and popped around each recursion step; errors snapshot
/// the rendered path at the point of failure.
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldPath(Vec<PathSegment>);

#[derive(Debug, Clone)]
enum PathSegment {
    Field(String),
    Index(usize),
    Key(String),
}

impl FieldPath {
    pub(crate) fn new() -> Self {
        FieldPath(Vec::new())
    }

    pub(crate) fn push_field(&mut self, wire_name: &str) {
        self.0.push(PathSegment::Field(wire_name.to_owned()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.0.push(PathSegment::Index(index));
    }

    pub(crate) fn push_key(&mut self, key: &str) {
        self.0.push(PathSegment::Key(key.to_owned()));
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub(crate) fn render(&self) -> String {
        if self.0.is_empty() {
            return "$".to_owned();
        }
        let mut out = String::new();
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) | PathSegment::Key(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}
