//! The generic, checked instance API: the escape hatch for callers that
//! work against descriptors dynamically instead of through the generated
//! accessors.

use serde_json::json;

use lexgate_core::models::ocr::{OcrJob, OcrSubmitParams};
use lexgate_core::{FieldValue, ModelInstance, SchemaError};

#[test]
fn with_value_checks_the_declared_kind() {
    let instance = ModelInstance::new(OcrJob::spec());

    let ok = instance
        .with_value("job_id", FieldValue::Str("job_1".to_owned()))
        .expect("string into a string field");
    assert_eq!(ok.get("job_id").and_then(|v| v.as_str()), Some("job_1"));

    let err = instance
        .with_value("job_id", FieldValue::Int(7))
        .unwrap_err();
    assert_eq!(
        err,
        SchemaError::KindMismatch {
            field: "job_id".to_owned(),
            expected: "string".to_owned(),
        }
    );
}

#[test]
fn with_value_applies_the_decoder_widenings() {
    let instance = ModelInstance::new(OcrJob::spec());

    // Int conforms to a float field exactly as it would on the wire.
    let widened = instance
        .with_value("confidence", FieldValue::Int(1))
        .expect("int widens into float");
    assert_eq!(
        widened.get("confidence").and_then(|v| v.as_float()),
        Some(1.0)
    );

    // Plain strings conform to enum fields, unknown members included.
    let status = instance
        .with_value("status", FieldValue::Str("archived".to_owned()))
        .expect("strings conform to enum fields");
    assert_eq!(
        status.get("status").and_then(|v| v.as_symbol()),
        Some("archived")
    );
}

#[test]
fn with_null_requires_a_nullable_field() {
    let instance = ModelInstance::new(OcrJob::spec());

    let nulled = instance.with_null("completed_at").expect("nullable field");
    assert!(nulled.state("completed_at").is_null());

    let err = instance.with_null("job_id").unwrap_err();
    assert_eq!(
        err,
        SchemaError::NotNullable {
            field: "job_id".to_owned(),
        }
    );
}

#[test]
fn unknown_fields_are_rejected_by_name() {
    let instance = ModelInstance::new(OcrJob::spec());
    let err = instance
        .with_value("jobid", FieldValue::Str("typo".to_owned()))
        .unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnknownField {
            model: "OcrJob".to_owned(),
            field: "jobid".to_owned(),
        }
    );
}

#[test]
fn cleared_returns_a_field_to_the_unset_state() {
    let params = OcrSubmitParams::new("doc_5").with_callback_url("https://example.test/done");
    let cleared = params
        .instance()
        .cleared("callback_url")
        .expect("known field");
    assert!(cleared.state("callback_url").is_unset());
    // The original still has the value.
    assert!(params.instance().state("callback_url").is_present());
}

#[test]
fn setters_never_mutate_the_receiver() {
    let base = ModelInstance::new(OcrJob::spec());
    let with_id = base
        .with_value("job_id", FieldValue::Str("job_2".to_owned()))
        .expect("string into a string field");

    assert!(base.state("job_id").is_unset());
    assert!(with_id.state("job_id").is_present());
}

#[test]
fn instances_serialize_as_their_wire_form() {
    let job = OcrJob::new("job_3", "completed".into()).with_page_count(4);
    let serialized = serde_json::to_value(job.instance()).expect("serialize");
    assert_eq!(
        serialized,
        json!({ "job_id": "job_3", "status": "completed", "page_count": 4 })
    );
}
