//! Decoding behavior against hand-built descriptor tables: presence,
//! nullability, coercions, unions, forward compatibility and the recursion
//! guard.

use once_cell::sync::Lazy;
use serde_json::json;

use lexgate_core::{
    decode, encode, DecodeErrorKind, FieldKind, FieldSpec, FieldState, ModelSpec, Scalar,
};

static CHARGE: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Charge",
        vec![
            FieldSpec::required("amount", "amount", FieldKind::Scalar(Scalar::Int)),
            FieldSpec::optional("currency", "currency", FieldKind::Scalar(Scalar::String)),
            FieldSpec::optional("metadata", "metadata", FieldKind::Scalar(Scalar::Any)),
        ],
    )
});

#[test]
fn optional_fields_stay_unset_and_are_omitted_on_encode() {
    let payload = json!({ "amount": 500 });
    let instance = decode(&payload, &CHARGE).expect("payload should decode");

    assert_eq!(
        instance.get("amount").and_then(|v| v.as_int()),
        Some(500),
        "amount should be decoded as an int"
    );
    assert!(instance.state("currency").is_unset());
    assert!(instance.state("metadata").is_unset());

    // Unset fields must not reappear as keys, null or otherwise.
    assert_eq!(encode(&instance), json!({ "amount": 500 }));
}

#[test]
fn missing_required_field_is_reported_by_name() {
    let err = decode(&json!({ "currency": "EUR" }), &CHARGE).unwrap_err();
    assert_eq!(err.path, "amount");
    assert_eq!(err.kind, DecodeErrorKind::MissingRequiredField);
}

#[test]
fn unknown_keys_are_ignored_and_dropped_on_reencode() {
    let payload = json!({ "amount": 5, "added_in_v9": true });
    let instance = decode(&payload, &CHARGE).expect("extra keys should not fail the decode");
    assert_eq!(encode(&instance), json!({ "amount": 5 }));
}

#[test]
fn type_mismatch_names_expected_and_actual() {
    let err = decode(&json!({ "amount": "five" }), &CHARGE).unwrap_err();
    assert_eq!(err.path, "amount");
    assert_eq!(
        err.kind,
        DecodeErrorKind::TypeMismatch {
            expected: "int".to_owned(),
            actual: "string".to_owned(),
        }
    );
}

#[test]
fn non_object_root_is_a_type_mismatch() {
    let err = decode(&json!([1, 2]), &CHARGE).unwrap_err();
    assert_eq!(err.path, "$");
    assert!(matches!(err.kind, DecodeErrorKind::TypeMismatch { .. }));
}

static NOTE: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Note",
        vec![FieldSpec::optional("body", "body", FieldKind::Scalar(Scalar::String)).nullable()],
    )
});

#[test]
fn absent_and_null_are_distinct_states() {
    let unset = decode(&json!({}), &NOTE).expect("empty object should decode");
    let null = decode(&json!({ "body": null }), &NOTE).expect("explicit null should decode");

    assert_eq!(unset.state("body"), FieldState::Unset);
    assert_eq!(null.state("body"), FieldState::Null);
    assert_ne!(unset, null);

    // Unset is omitted; explicit null is emitted.
    assert_eq!(encode(&unset), json!({}));
    assert_eq!(encode(&null), json!({ "body": null }));
}

#[test]
fn null_on_a_non_nullable_field_fails() {
    let err = decode(&json!({ "amount": null }), &CHARGE).unwrap_err();
    assert_eq!(err.path, "amount");
    assert_eq!(err.kind, DecodeErrorKind::UnexpectedNull);
}

static TIMESTAMPED: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Timestamped",
        vec![FieldSpec::required("at", "at", FieldKind::Scalar(Scalar::DateTime))],
    )
});

#[test]
fn datetime_parses_rfc3339_and_rejects_the_rest() {
    let ok = decode(&json!({ "at": "2026-03-01T09:30:00Z" }), &TIMESTAMPED)
        .expect("RFC 3339 should parse");
    assert!(ok.get("at").is_some_and(|v| v.as_datetime().is_some()));

    let err = decode(&json!({ "at": "yesterday" }), &TIMESTAMPED).unwrap_err();
    assert_eq!(err.path, "at");
    assert_eq!(
        err.kind,
        DecodeErrorKind::InvalidDateTime {
            raw: "yesterday".to_owned()
        }
    );
}

static MEASURE: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Measure",
        vec![FieldSpec::required("ratio", "ratio", FieldKind::Scalar(Scalar::Float))],
    )
});

#[test]
fn integers_widen_into_float_fields() {
    let instance = decode(&json!({ "ratio": 3 }), &MEASURE).expect("int should widen");
    assert_eq!(
        instance.get("ratio").and_then(|v| v.as_float()),
        Some(3.0)
    );
}

static TAGGED: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Tagged",
        vec![FieldSpec::required(
            "value",
            "value",
            FieldKind::Union(vec![
                FieldKind::Scalar(Scalar::String),
                FieldKind::List(Box::new(FieldKind::Scalar(Scalar::String))),
            ]),
        )],
    )
});

#[test]
fn union_takes_the_first_member_that_decodes() {
    let single = decode(&json!({ "value": "hello" }), &TAGGED).expect("string member");
    assert_eq!(
        single.get("value").and_then(|v| v.as_str()),
        Some("hello")
    );

    let list = decode(&json!({ "value": ["a", "b"] }), &TAGGED).expect("list member");
    assert_eq!(
        list.get("value").and_then(|v| v.as_list()).map(|l| l.len()),
        Some(2)
    );
}

#[test]
fn union_reports_every_member_it_tried() {
    let err = decode(&json!({ "value": 42 }), &TAGGED).unwrap_err();
    assert_eq!(err.path, "value");
    assert_eq!(
        err.kind,
        DecodeErrorKind::NoUnionMemberMatched {
            tried: vec!["string".to_owned(), "list<string>".to_owned()],
        }
    );
}

static TICKET: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Ticket",
        vec![FieldSpec::required(
            "status",
            "status",
            FieldKind::Enum(&["open", "closed"]),
        )],
    )
});

#[test]
fn unknown_enum_members_survive_a_round_trip() {
    let payload = json!({ "status": "archived" });
    let instance = decode(&payload, &TICKET).expect("unknown members must not fail");
    assert_eq!(
        instance.get("status").and_then(|v| v.as_symbol()),
        Some("archived")
    );
    assert_eq!(encode(&instance), payload);
}

static NODE: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Node",
        vec![
            FieldSpec::optional("label", "label", FieldKind::Scalar(Scalar::String)),
            FieldSpec::optional("child", "child", FieldKind::Model(node_spec)),
        ],
    )
});

fn node_spec() -> &'static ModelSpec {
    &NODE
}

#[test]
fn recursion_is_bounded_even_for_cyclic_descriptors() {
    // A few levels are fine.
    let shallow = json!({ "child": { "child": { "label": "leaf" } } });
    assert!(decode(&shallow, &NODE).is_ok());

    // A payload nested past the guard must fail instead of overflowing.
    let mut deep = json!({ "label": "leaf" });
    for _ in 0..200 {
        deep = json!({ "child": deep });
    }
    let err = decode(&deep, &NODE).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::DepthLimitExceeded);
}

static SANDBOXED: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Sandboxed",
        vec![FieldSpec::optional("sandbox", "sandbox", FieldKind::Model(limits_spec))],
    )
});

static LIMITS: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Limits",
        vec![FieldSpec::optional("cpu", "cpu", FieldKind::Scalar(Scalar::Int))],
    )
});

fn limits_spec() -> &'static ModelSpec {
    &LIMITS
}

#[test]
fn nested_errors_carry_a_dotted_path() {
    let err = decode(&json!({ "sandbox": { "cpu": "two" } }), &SANDBOXED).unwrap_err();
    assert_eq!(err.path, "sandbox.cpu");
}

static MANIFEST: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Manifest",
        vec![FieldSpec::required(
            "parts",
            "parts",
            FieldKind::List(Box::new(FieldKind::Model(part_spec))),
        )],
    )
});

static PART: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Part",
        vec![FieldSpec::required("etag", "etag", FieldKind::Scalar(Scalar::String))],
    )
});

fn part_spec() -> &'static ModelSpec {
    &PART
}

#[test]
fn list_errors_carry_an_indexed_path() {
    let payload = json!({
        "parts": [ { "etag": "a" }, { "etag": "b" }, { "etag": 7 } ]
    });
    let err = decode(&payload, &MANIFEST).unwrap_err();
    assert_eq!(err.path, "parts[2].etag");

    let missing = json!({ "parts": [ { "etag": "a" }, {} ] });
    let err = decode(&missing, &MANIFEST).unwrap_err();
    assert_eq!(err.path, "parts[1].etag");
    assert_eq!(err.kind, DecodeErrorKind::MissingRequiredField);
}

static LABELLED: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Labelled",
        vec![FieldSpec::optional(
            "labels",
            "labels",
            FieldKind::Map(Box::new(FieldKind::Scalar(Scalar::String))),
        )],
    )
});

#[test]
fn map_values_are_checked_and_keys_kept_verbatim() {
    let ok = decode(&json!({ "labels": { "env": "prod", "Region": "eu-1" } }), &LABELLED)
        .expect("string map should decode");
    let labels = ok.get("labels").and_then(|v| v.as_map()).expect("labels present");
    assert_eq!(labels.get("Region").and_then(|v| v.as_str()), Some("eu-1"));

    let err = decode(&json!({ "labels": { "env": 1 } }), &LABELLED).unwrap_err();
    assert_eq!(err.path, "labels.env");
}

#[test]
fn decoding_is_deterministic() {
    let payload = json!({ "amount": 12, "currency": "USD", "metadata": { "k": [1, 2] } });
    let first = decode(&payload, &CHARGE).expect("decode");
    let second = decode(&payload, &CHARGE).expect("decode");
    assert_eq!(first, second);
    assert_eq!(encode(&first), encode(&second));
}
