//! Wire types for the agent execution service.

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::decode::decode;
use crate::encode::encode;
use crate::error::DecodeError;
use crate::instance::ModelInstance;
use crate::models::common::{ApiIssue, JobStatus};
use crate::schema::{FieldKind, FieldSpec, ModelSpec, Scalar};
use crate::value::FieldValue;

/// Network policy for an agent sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxNetwork {
    None,
    Egress,
    Full,
    Unrecognized(String),
}

impl SandboxNetwork {
    pub const MEMBERS: &'static [&'static str] = &["none", "egress", "full"];

    pub fn as_str(&self) -> &str {
        match self {
            SandboxNetwork::None => "none",
            SandboxNetwork::Egress => "egress",
            SandboxNetwork::Full => "full",
            SandboxNetwork::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for SandboxNetwork {
    fn from(raw: &str) -> Self {
        match raw {
            "none" => SandboxNetwork::None,
            "egress" => SandboxNetwork::Egress,
            "full" => SandboxNetwork::Full,
            other => SandboxNetwork::Unrecognized(other.to_owned()),
        }
    }
}

static SANDBOX_SPEC: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "SandboxSpec",
        vec![
            FieldSpec::optional("cpu", "cpu", FieldKind::Scalar(Scalar::Int)),
            FieldSpec::optional("memory_mb", "memory_mb", FieldKind::Scalar(Scalar::Int)),
            FieldSpec::optional("network", "network", FieldKind::Enum(SandboxNetwork::MEMBERS)),
        ],
    )
});

/// Resource limits for the sandbox an agent run executes in. Every field is
/// optional; the server applies plan defaults for anything unset.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxSpec {
    inner: ModelInstance,
}

impl SandboxSpec {
    pub fn spec() -> &'static ModelSpec {
        &SANDBOX_SPEC
    }

    pub fn new() -> Self {
        SandboxSpec {
            inner: ModelInstance::new(Self::spec()),
        }
    }

    pub(crate) fn from_instance(inner: ModelInstance) -> Self {
        debug_assert!(std::ptr::eq(inner.spec(), Self::spec()));
        SandboxSpec { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| SandboxSpec { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn cpu(&self) -> Option<i64> {
        self.inner.get("cpu").and_then(FieldValue::as_int)
    }

    pub fn memory_mb(&self) -> Option<i64> {
        self.inner.get("memory_mb").and_then(FieldValue::as_int)
    }

    pub fn network(&self) -> Option<SandboxNetwork> {
        self.inner
            .get("network")
            .and_then(FieldValue::as_symbol)
            .map(SandboxNetwork::from)
    }

    pub fn with_cpu(&self, cpu: i64) -> Self {
        SandboxSpec {
            inner: self.inner.clone().put("cpu", FieldValue::Int(cpu)),
        }
    }

    pub fn with_memory_mb(&self, memory_mb: i64) -> Self {
        SandboxSpec {
            inner: self.inner.clone().put("memory_mb", FieldValue::Int(memory_mb)),
        }
    }

    pub fn with_network(&self, network: SandboxNetwork) -> Self {
        SandboxSpec {
            inner: self
                .inner
                .clone()
                .put("network", FieldValue::Symbol(network.as_str().to_owned())),
        }
    }
}

impl Default for SandboxSpec {
    fn default() -> Self {
        Self::new()
    }
}

static AGENT_RUN_PARAMS: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "AgentRunParams",
        vec![
            FieldSpec::required("agent_id", "agent_id", FieldKind::Scalar(Scalar::String)),
            FieldSpec::required("input", "input", FieldKind::Scalar(Scalar::Any)),
            FieldSpec::optional(
                "tools",
                "tools",
                FieldKind::List(Box::new(FieldKind::Scalar(Scalar::String))),
            ),
            FieldSpec::optional("sandbox", "sandbox", FieldKind::Model(SandboxSpec::spec)),
        ],
    )
});

/// Request body for starting an agent run.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRunParams {
    inner: ModelInstance,
}

impl AgentRunParams {
    pub fn spec() -> &'static ModelSpec {
        &AGENT_RUN_PARAMS
    }

    pub fn new(agent_id: impl Into<String>, input: Value) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("agent_id", FieldValue::Str(agent_id.into()))
            .put("input", FieldValue::Any(input));
        AgentRunParams { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| AgentRunParams { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn agent_id(&self) -> &str {
        self.inner
            .get("agent_id")
            .and_then(FieldValue::as_str)
            .expect("agent_id is required")
    }

    pub fn input(&self) -> &Value {
        self.inner
            .get("input")
            .and_then(FieldValue::as_any)
            .expect("input is required")
    }

    pub fn tools(&self) -> Option<Vec<&str>> {
        self.inner
            .get("tools")
            .and_then(FieldValue::as_list)
            .map(|items| items.iter().filter_map(FieldValue::as_str).collect())
    }

    pub fn sandbox(&self) -> Option<SandboxSpec> {
        self.inner
            .get("sandbox")
            .and_then(FieldValue::as_model)
            .map(|m| SandboxSpec::from_instance(m.clone()))
    }

    pub fn with_tools(&self, tools: Vec<String>) -> Self {
        let items = tools.into_iter().map(FieldValue::Str).collect();
        AgentRunParams {
            inner: self.inner.clone().put("tools", FieldValue::List(items)),
        }
    }

    pub fn with_sandbox(&self, sandbox: SandboxSpec) -> Self {
        AgentRunParams {
            inner: self
                .inner
                .clone()
                .put("sandbox", FieldValue::Model(sandbox.instance().clone())),
        }
    }
}

static AGENT_RUN: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "AgentRun",
        vec![
            FieldSpec::required("run_id", "run_id", FieldKind::Scalar(Scalar::String)),
            FieldSpec::required("status", "status", FieldKind::Enum(JobStatus::MEMBERS)),
            FieldSpec::optional("output", "output", FieldKind::Scalar(Scalar::Any)).nullable(),
            FieldSpec::optional("started_at", "started_at", FieldKind::Scalar(Scalar::DateTime)),
            FieldSpec::optional("sandbox", "sandbox", FieldKind::Model(SandboxSpec::spec)),
            FieldSpec::optional("error", "error", FieldKind::Model(ApiIssue::spec)).nullable(),
        ],
    )
});

/// An agent run as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRun {
    inner: ModelInstance,
}

impl AgentRun {
    pub fn spec() -> &'static ModelSpec {
        &AGENT_RUN
    }

    pub fn new(run_id: impl Into<String>, status: JobStatus) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("run_id", FieldValue::Str(run_id.into()))
            .put("status", FieldValue::Symbol(status.as_str().to_owned()));
        AgentRun { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| AgentRun { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn run_id(&self) -> &str {
        self.inner
            .get("run_id")
            .and_then(FieldValue::as_str)
            .expect("run_id is required")
    }

    pub fn status(&self) -> JobStatus {
        self.inner
            .get("status")
            .and_then(FieldValue::as_symbol)
            .map(JobStatus::from)
            .expect("status is required")
    }

    pub fn output(&self) -> Option<&Value> {
        self.inner.get("output").and_then(FieldValue::as_any)
    }

    pub fn started_at(&self) -> Option<&DateTime<FixedOffset>> {
        self.inner.get("started_at").and_then(FieldValue::as_datetime)
    }

    pub fn sandbox(&self) -> Option<SandboxSpec> {
        self.inner
            .get("sandbox")
            .and_then(FieldValue::as_model)
            .map(|m| SandboxSpec::from_instance(m.clone()))
    }

    pub fn error(&self) -> Option<ApiIssue> {
        self.inner
            .get("error")
            .and_then(FieldValue::as_model)
            .map(|m| ApiIssue::from_instance(m.clone()))
    }

    pub fn with_output(&self, output: Value) -> Self {
        AgentRun {
            inner: self.inner.clone().put("output", FieldValue::Any(output)),
        }
    }

    pub fn with_output_null(&self) -> Self {
        AgentRun {
            inner: self.inner.clone().put_null("output"),
        }
    }

    pub fn with_started_at(&self, started_at: DateTime<FixedOffset>) -> Self {
        AgentRun {
            inner: self
                .inner
                .clone()
                .put("started_at", FieldValue::DateTime(started_at)),
        }
    }

    pub fn with_sandbox(&self, sandbox: SandboxSpec) -> Self {
        AgentRun {
            inner: self
                .inner
                .clone()
                .put("sandbox", FieldValue::Model(sandbox.instance().clone())),
        }
    }

    pub fn with_error(&self, error: ApiIssue) -> Self {
        AgentRun {
            inner: self
                .inner
                .clone()
                .put("error", FieldValue::Model(error.instance().clone())),
        }
    }
}
