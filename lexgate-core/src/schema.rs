//! Field and model descriptors: the metadata that drives every decode and
//! encode.
//!
//! Each wire model declares one static [`ModelSpec`]: an ordered list of
//! [`FieldSpec`]s giving the wire name, presence requirement, nullability and
//! value kind of every field. The descriptors are plain, inspectable data
//! values, built once per type and shared for the life of the process. No
//! runtime reflection is involved; everything the marshaler knows about a
//! type is in its table.
//!
//! # Invariants
//! - Wire names are unique within a spec and match the identifier pattern.
//! - Enum member lists and union member lists are non-empty.
//!
//! Violations are schema-authoring bugs in a model table, so [`ModelSpec::new`]
//! aborts construction rather than propagating an error to every call site.
//!
//! # Nesting
//! Specs reference each other through plain `fn() -> &'static ModelSpec`
//! pointers, which keeps the static tables free of initialization-order
//! problems. The generated tables are acyclic in practice, but nothing here
//! can prove that, so the decoder carries a recursion guard.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Presence contract for a field: must the key appear in a valid payload?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Scalar value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    String,
    /// JSON integer, decoded as `i64`. Never accepts fractional values.
    Int,
    /// JSON number, decoded as `f64`. Integers widen into floats.
    Float,
    Bool,
    /// RFC 3339 datetime carried as a JSON string.
    DateTime,
    /// An arbitrary JSON tree, carried verbatim.
    Any,
}

/// Accessor for a nested model's descriptor table.
pub type ModelSpecFn = fn() -> &'static ModelSpec;

/// The value kind of a field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Scalar(Scalar),
    /// Closed string set on the wire. Unknown members decode to an
    /// unrecognized value instead of failing; servers add members first.
    Enum(&'static [&'static str]),
    /// A nested model, decoded against its own spec.
    Model(ModelSpecFn),
    /// Homogeneous JSON array.
    List(Box<FieldKind>),
    /// JSON object with arbitrary keys and homogeneous values.
    Map(Box<FieldKind>),
    /// One of several kinds, tried in declared order; first match wins.
    Union(Vec<FieldKind>),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(Scalar::String) => write!(f, "string"),
            FieldKind::Scalar(Scalar::Int) => write!(f, "int"),
            FieldKind::Scalar(Scalar::Float) => write!(f, "float"),
            FieldKind::Scalar(Scalar::Bool) => write!(f, "bool"),
            FieldKind::Scalar(Scalar::DateTime) => write!(f, "datetime"),
            FieldKind::Scalar(Scalar::Any) => write!(f, "any"),
            FieldKind::Enum(_) => write!(f, "enum"),
            FieldKind::Model(spec) => write!(f, "model({})", spec().name()),
            FieldKind::List(inner) => write!(f, "list<{inner}>"),
            FieldKind::Map(inner) => write!(f, "map<{inner}>"),
            FieldKind::Union(members) => {
                write!(f, "union<")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, ">")
            }
        }
    }
}

/// Descriptor for a single field of a model.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// In-memory field name, used as the instance key.
    pub name: &'static str,
    /// Key used in the serialized JSON representation.
    pub wire_name: &'static str,
    pub presence: Presence,
    /// Whether JSON null is a legal value in addition to a concrete one.
    pub nullable: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn required(name: &'static str, wire_name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            wire_name,
            presence: Presence::Required,
            nullable: false,
            kind,
        }
    }

    pub fn optional(name: &'static str, wire_name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            wire_name,
            presence: Presence::Optional,
            nullable: false,
            kind,
        }
    }

    /// Marks the field as accepting JSON null.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Ordered field descriptors plus the type's identity.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

static WIRE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("wire name pattern"));

impl ModelSpec {
    /// Builds a model descriptor, checking the table invariants.
    ///
    /// # Panics
    ///
    /// Panics on duplicate or malformed wire names and on empty enum or union
    /// member lists. These are bugs in the model table, caught at the first
    /// use of the static.
    pub fn new(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        if let Err(issue) = validate(&fields) {
            panic!("invalid model descriptor `{name}`: {issue}");
        }
        ModelSpec { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks a field up by its in-memory name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks a field up by its wire name.
    pub fn field_by_wire(&self, wire_name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }
}

fn validate(fields: &[FieldSpec]) -> Result<(), String> {
    for (i, field) in fields.iter().enumerate() {
        if !WIRE_NAME_PATTERN.is_match(field.wire_name) {
            return Err(format!("malformed wire name `{}`", field.wire_name));
        }
        if fields[..i].iter().any(|f| f.wire_name == field.wire_name) {
            return Err(format!("duplicate wire name `{}`", field.wire_name));
        }
        validate_kind(field.name, &field.kind)?;
    }
    Ok(())
}

fn validate_kind(field: &str, kind: &FieldKind) -> Result<(), String> {
    match kind {
        FieldKind::Scalar(_) | FieldKind::Model(_) => Ok(()),
        FieldKind::Enum(members) => {
            if members.is_empty() {
                return Err(format!("field `{field}` declares an empty enum"));
            }
            Ok(())
        }
        FieldKind::List(inner) | FieldKind::Map(inner) => validate_kind(field, inner),
        FieldKind::Union(members) => {
            if members.is_empty() {
                return Err(format!("field `{field}` declares an empty union"));
            }
            for member in members {
                validate_kind(field, member)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_field(name: &'static str, wire: &'static str) -> FieldSpec {
        FieldSpec::required(name, wire, FieldKind::Scalar(Scalar::String))
    }

    #[test]
    fn lookup_by_name_and_wire_name() {
        let spec = ModelSpec::new(
            "Example",
            vec![
                string_field("account_id", "destination_account_id"),
                FieldSpec::optional("note", "note", FieldKind::Scalar(Scalar::String)).nullable(),
            ],
        );
        assert_eq!(
            spec.field("account_id").map(|f| f.wire_name),
            Some("destination_account_id")
        );
        assert!(spec.field_by_wire("note").is_some());
        assert!(spec.field("destination_account_id").is_none());
        assert!(spec.field("note").is_some_and(|f| f.nullable));
    }

    #[test]
    #[should_panic(expected = "duplicate wire name")]
    fn duplicate_wire_names_are_rejected() {
        ModelSpec::new(
            "Broken",
            vec![string_field("a", "same"), string_field("b", "same")],
        );
    }

    #[test]
    #[should_panic(expected = "malformed wire name")]
    fn malformed_wire_names_are_rejected() {
        ModelSpec::new("Broken", vec![string_field("a", "not a key")]);
    }

    #[test]
    #[should_panic(expected = "empty union")]
    fn empty_unions_are_rejected() {
        ModelSpec::new(
            "Broken",
            vec![FieldSpec::required("u", "u", FieldKind::Union(vec![]))],
        );
    }

    #[test]
    fn kind_display_is_stable() {
        let kind = FieldKind::Union(vec![
            FieldKind::Scalar(Scalar::String),
            FieldKind::List(Box::new(FieldKind::Scalar(Scalar::String))),
        ]);
        assert_eq!(kind.to_string(), "union<string|list<string>>");
    }
}
