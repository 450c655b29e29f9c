use std::fs::write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

#[test]
fn models_lists_the_known_models() {
    let mut cmd = Command::cargo_bin("lexgate").expect("binary should build");
    cmd.arg("models")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ocr-job")
                .and(predicate::str::contains("hold-params"))
                .and(predicate::str::contains("vault-object-page")),
        );
}

#[test]
fn inspect_reports_the_tri_state_of_every_field() {
    let payload_file = NamedTempFile::new().expect("temp file");
    write(
        payload_file.path(),
        br#"{ "job_id": "job_1", "status": "queued", "completed_at": null, "added_later": 1 }"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("lexgate").expect("binary should build");
    cmd.args(["inspect", "--model", "ocr-job", "--file"])
        .arg(payload_file.path())
        .assert()
        .success()
        .stdout(
            // page_count was absent, completed_at was an explicit null, and
            // the unknown key must not survive the re-encode.
            predicate::str::contains("page_count")
                .and(predicate::str::contains("unset"))
                .and(predicate::str::contains("null"))
                .and(predicate::str::contains("added_later").not()),
        );
}

#[test]
fn inspect_rejects_unknown_model_names() {
    let payload_file = NamedTempFile::new().expect("temp file");
    write(payload_file.path(), b"{}").unwrap();

    let mut cmd = Command::cargo_bin("lexgate").expect("binary should build");
    cmd.args(["inspect", "--model", "no-such-model", "--file"])
        .arg(payload_file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown model"));
}

#[test]
fn inspect_surfaces_decode_failures_with_the_field_path() {
    let payload_file = NamedTempFile::new().expect("temp file");
    write(payload_file.path(), br#"{ "status": "queued" }"#).unwrap();

    let mut cmd = Command::cargo_bin("lexgate").expect("binary should build");
    cmd.args(["inspect", "--model", "ocr-job", "--file"])
        .arg(payload_file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("job_id"));
}
