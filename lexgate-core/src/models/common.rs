//! Wire types shared across services.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::decode::decode;
use crate::encode::encode;
use crate::error::DecodeError;
use crate::instance::ModelInstance;
use crate::schema::{FieldKind, FieldSpec, ModelSpec, Scalar};
use crate::value::FieldValue;

/// Lifecycle state of an asynchronous platform job (OCR, agent runs,
/// deployments). Values outside the known set are preserved verbatim so a
/// newer server does not break an older client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
    Unrecognized(String),
}

impl JobStatus {
    pub const MEMBERS: &'static [&'static str] =
        &["queued", "running", "completed", "failed", "cancelled"];

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Unrecognized(raw) => raw,
        }
    }

    /// Whether the job has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

impl From<&str> for JobStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "queued" => JobStatus::Queued,
            "running" => JobStatus::Running,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            "cancelled" => JobStatus::Cancelled,
            other => JobStatus::Unrecognized(other.to_owned()),
        }
    }
}

static API_ISSUE: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "ApiIssue",
        vec![
            FieldSpec::required("code", "code", FieldKind::Scalar(Scalar::String)),
            FieldSpec::required("message", "message", FieldKind::Scalar(Scalar::String)),
            FieldSpec::optional("field", "field", FieldKind::Scalar(Scalar::String)).nullable(),
        ],
    )
});

/// A structured problem report attached to failed jobs and runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiIssue {
    inner: ModelInstance,
}

impl ApiIssue {
    pub fn spec() -> &'static ModelSpec {
        &API_ISSUE
    }

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("code", FieldValue::Str(code.into()))
            .put("message", FieldValue::Str(message.into()));
        ApiIssue { inner }
    }

    pub(crate) fn from_instance(inner: ModelInstance) -> Self {
        debug_assert!(std::ptr::eq(inner.spec(), Self::spec()));
        ApiIssue { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| ApiIssue { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn code(&self) -> &str {
        self.inner
            .get("code")
            .and_then(FieldValue::as_str)
            .expect("code is required")
    }

    pub fn message(&self) -> &str {
        self.inner
            .get("message")
            .and_then(FieldValue::as_str)
            .expect("message is required")
    }

    /// The request field the issue points at, if the server named one.
    pub fn field(&self) -> Option<&str> {
        self.inner.get("field").and_then(FieldValue::as_str)
    }

    pub fn with_field(&self, field: impl Into<String>) -> Self {
        ApiIssue {
            inner: self.inner.clone().put("field", FieldValue::Str(field.into())),
        }
    }

    pub fn with_field_null(&self) -> Self {
        ApiIssue {
            inner: self.inner.clone().put_null("field"),
        }
    }
}
