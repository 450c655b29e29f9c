//! Round-trip guarantees for the generated model layer: anything built
//! through the typed builders survives encode → decode unchanged.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde_json::json;

use lexgate_core::models::agents::{AgentRunParams, SandboxNetwork, SandboxSpec};
use lexgate_core::models::common::{ApiIssue, JobStatus};
use lexgate_core::models::ocr::{OcrEngine, OcrJob, OcrSubmitParams};
use lexgate_core::models::payments::{Hold, HoldStatus};
use lexgate_core::models::translation::{TranslateParams, TranslationText};
use lexgate_core::models::vault::{VaultObject, VaultObjectPage};

#[test]
fn ocr_job_round_trips_with_every_field_set() {
    let completed_at = DateTime::parse_from_rfc3339("2026-02-11T18:04:05+01:00")
        .expect("test timestamp should parse");
    let job = OcrJob::new("job_01H", JobStatus::Completed)
        .with_page_count(12)
        .with_confidence(0.97)
        .with_completed_at(completed_at)
        .with_error(ApiIssue::new("ocr_partial", "three pages were skewed").with_field_null());

    let wire = job.to_wire();
    let back = OcrJob::from_wire(&wire).expect("encoded job should decode");
    assert_eq!(back, job);
    assert_eq!(back.page_count(), Some(12));
    assert_eq!(
        back.error().map(|e| e.code().to_owned()),
        Some("ocr_partial".to_owned())
    );
}

#[test]
fn unrecognized_status_round_trips_verbatim() {
    let payload = json!({ "job_id": "job_9", "status": "archived" });
    let job = OcrJob::from_wire(&payload).expect("unknown status must not fail");
    assert_eq!(job.status(), JobStatus::Unrecognized("archived".to_owned()));
    assert!(!job.status().is_terminal());
    assert_eq!(job.to_wire(), payload);
}

#[test]
fn explicit_null_and_unset_encode_differently() {
    let unset = OcrSubmitParams::new("doc_1");
    let nulled = unset.with_callback_url_null();

    assert_eq!(unset.to_wire(), json!({ "document_id": "doc_1" }));
    assert_eq!(
        nulled.to_wire(),
        json!({ "document_id": "doc_1", "callback_url": null })
    );
    assert_ne!(unset, nulled);
}

#[test]
fn builders_leave_the_receiver_untouched() {
    let base = OcrSubmitParams::new("doc_2");
    let with_engine = base.with_engine(OcrEngine::Premium);

    assert_eq!(base.engine(), None, "receiver must not observe the change");
    assert_eq!(with_engine.engine(), Some(OcrEngine::Premium));
    assert_eq!(with_engine.document_id(), "doc_2");
}

#[test]
fn translation_union_round_trips_both_shapes() {
    let single = TranslateParams::new("bonjour", "en").with_source_lang("fr");
    let wire = single.to_wire();
    assert_eq!(wire["text"], "bonjour");
    let back = TranslateParams::from_wire(&wire).expect("single text should decode");
    assert_eq!(back, single);
    assert_eq!(back.text(), TranslationText::Single("bonjour".to_owned()));

    let batch =
        TranslateParams::new(vec!["een".to_owned(), "twee".to_owned()], "en").with_source_lang_null();
    let wire = batch.to_wire();
    assert_eq!(wire["text"], json!(["een", "twee"]));
    assert_eq!(wire["source_lang"], json!(null));
    let back = TranslateParams::from_wire(&wire).expect("batch text should decode");
    assert_eq!(back, batch);
    assert_eq!(
        back.text(),
        TranslationText::Batch(vec!["een".to_owned(), "twee".to_owned()])
    );
}

#[test]
fn hold_round_trips_with_metadata() {
    let mut metadata = BTreeMap::new();
    metadata.insert("matter_id".to_owned(), json!("M-2207"));
    metadata.insert("retainer".to_owned(), json!({ "hours": 12, "rate": 180 }));

    let created_at =
        DateTime::parse_from_rfc3339("2026-04-02T08:00:00Z").expect("test timestamp should parse");
    let hold = Hold::new("hold_7", HoldStatus::Pending, 216_000, "EUR")
        .with_created_at(created_at)
        .with_metadata(metadata);

    let wire = hold.to_wire();
    assert_eq!(wire["metadata"]["retainer"]["hours"], 12);
    let back = Hold::from_wire(&wire).expect("encoded hold should decode");
    assert_eq!(back, hold);
    assert_eq!(back.status(), HoldStatus::Pending);
}

#[test]
fn agent_run_params_round_trip_with_nested_sandbox() {
    let sandbox = SandboxSpec::new()
        .with_cpu(2)
        .with_memory_mb(2048)
        .with_network(SandboxNetwork::Egress);
    let params = AgentRunParams::new("agent_research", json!({ "query": "precedent for X" }))
        .with_tools(vec!["search".to_owned(), "citation_check".to_owned()])
        .with_sandbox(sandbox.clone());

    let wire = params.to_wire();
    assert_eq!(wire["sandbox"]["network"], "egress");
    let back = AgentRunParams::from_wire(&wire).expect("encoded params should decode");
    assert_eq!(back, params);
    assert_eq!(back.sandbox(), Some(sandbox));
}

#[test]
fn vault_page_round_trips_nested_items() {
    let page = VaultObjectPage::new(vec![
        VaultObject::new("briefs/a.pdf", 48_213).with_content_type("application/pdf"),
        VaultObject::new("briefs/b.pdf", 9_001).with_content_type_null(),
    ])
    .with_next_token("tok_2");

    let wire = page.to_wire();
    let back = VaultObjectPage::from_wire(&wire).expect("encoded page should decode");
    assert_eq!(back, page);

    let items = back.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].content_type(), Some("application/pdf"));
    assert_eq!(items[1].content_type(), None);
    assert!(items[1].instance().state("content_type").is_null());
    assert_eq!(back.next_token(), Some("tok_2"));
}
