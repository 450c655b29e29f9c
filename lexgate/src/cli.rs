//! CLI for the Lexgate SDK: a payload inspection harness plus a thin live
//! query command.
//!
//! The `inspect` subcommand is the day-to-day tool: feed it a JSON payload
//! and a model name and it reports, per field, whether the payload left the
//! field unset, explicitly null, or set to a value, then prints the
//! re-encoded wire form. `models` lists the model names this build knows.
//! `ocr-status` talks to a real deployment using the configured API
//! credentials.
//!
//! All decode and encode behavior lives in `lexgate-core`; this module is
//! strictly argument parsing, wiring and output.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use lexgate_core::contract::DocumentOcr;
use lexgate_core::models::agents::{AgentRun, AgentRunParams, SandboxSpec};
use lexgate_core::models::common::ApiIssue;
use lexgate_core::models::ocr::{OcrJob, OcrSubmitParams};
use lexgate_core::models::payments::{CaptureParams, Hold, HoldParams};
use lexgate_core::models::translation::{TranslateParams, Translation};
use lexgate_core::models::vault::{PutObjectParams, VaultObject, VaultObjectPage};
use lexgate_core::{decode, encode, FieldState, ModelSpec};

use crate::config::Configuration;
use crate::load_config::load_config;
use crate::services::OcrClient;

/// CLI for the Lexgate platform SDK.
#[derive(Parser)]
#[clap(
    name = "lexgate",
    version,
    about = "Inspect Lexgate wire payloads and query the platform API"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the wire models known to this build
    Models,
    /// Decode a JSON payload against a named model and report each field
    Inspect {
        /// Model name as printed by `lexgate models`
        #[clap(long)]
        model: String,
        /// Path to a file holding the JSON payload
        #[clap(long)]
        file: PathBuf,
    },
    /// Fetch the current state of an OCR job from the configured deployment
    OcrStatus {
        #[clap(long)]
        job_id: String,
        /// Optional YAML config file; environment variables otherwise
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

fn registry() -> Vec<(&'static str, &'static ModelSpec)> {
    vec![
        ("api-issue", ApiIssue::spec()),
        ("ocr-submit-params", OcrSubmitParams::spec()),
        ("ocr-job", OcrJob::spec()),
        ("translate-params", TranslateParams::spec()),
        ("translation", Translation::spec()),
        ("hold-params", HoldParams::spec()),
        ("capture-params", CaptureParams::spec()),
        ("hold", Hold::spec()),
        ("put-object-params", PutObjectParams::spec()),
        ("vault-object", VaultObject::spec()),
        ("vault-object-page", VaultObjectPage::spec()),
        ("sandbox-spec", SandboxSpec::spec()),
        ("agent-run-params", AgentRunParams::spec()),
        ("agent-run", AgentRun::spec()),
    ]
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Models => {
            for (name, spec) in registry() {
                println!("{name:<24} {} fields", spec.fields().len());
            }
            Ok(())
        }
        Commands::Inspect { model, file } => {
            let spec = registry()
                .into_iter()
                .find(|(name, _)| *name == model)
                .map(|(_, spec)| spec)
                .ok_or_else(|| anyhow!("unknown model `{model}`; run `lexgate models`"))?;

            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read payload file {file:?}"))?;
            let payload: Value = serde_json::from_str(&raw)
                .with_context(|| format!("payload file {file:?} is not valid JSON"))?;

            let instance = match decode(&payload, spec) {
                Ok(instance) => instance,
                Err(e) => {
                    tracing::error!(model, error = %e, "Payload did not decode");
                    return Err(anyhow::Error::new(e));
                }
            };

            let wire = encode(&instance);
            println!("{}:", spec.name());
            for field in spec.fields() {
                let shown = match instance.state(field.name) {
                    FieldState::Unset => "unset".to_owned(),
                    FieldState::Null => "null".to_owned(),
                    FieldState::Present(_) => wire[field.wire_name].to_string(),
                };
                println!("  {:<24} {shown}", field.name);
            }
            println!("{}", serde_json::to_string_pretty(&wire)?);
            Ok(())
        }
        Commands::OcrStatus { job_id, config } => {
            let conf = match config {
                Some(path) => {
                    let file = load_config(path)?;
                    let mut conf = Configuration::new(file.api.base_url);
                    if let Ok(api_key) = std::env::var("LEXGATE_API_KEY") {
                        conf = conf.with_api_key(api_key);
                    }
                    if let Some(timeout_secs) = file.api.timeout_secs {
                        conf = conf
                            .with_timeout(Duration::from_secs(timeout_secs))
                            .map_err(|e| anyhow!("failed to apply timeout: {e}"))?;
                    }
                    conf
                }
                None => Configuration::from_env()
                    .map_err(|e| anyhow!("configuration from environment failed: {e}"))?,
            };

            let client = OcrClient::new(Arc::new(conf));
            match client.get_job(&job_id).await {
                Ok(job) => {
                    tracing::info!(job_id = job.job_id(), status = job.status().as_str(), "Fetched job");
                    println!("{}", serde_json::to_string_pretty(&job.to_wire())?);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(job_id, error = %e, "Failed to fetch job");
                    Err(anyhow!("failed to fetch OCR job {job_id}: {e}"))
                }
            }
        }
    }
}
