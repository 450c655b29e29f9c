//! Wire types for the document OCR service.

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

/// Recognition engine tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrEngine {
    Standard,
    Premium,
    Unrecognized(String),
}

impl OcrEngine {
    pub const MEMBERS: &'static [&'static str] = &["standard", "premium"];

    pub fn as_str(&self) -> &str {
        match self {
            OcrEngine::Standard => "standard",
            OcrEngine::Premium => "premium",
            OcrEngine::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for OcrEngine {
    fn from(raw: &str) -> Self {
        match raw {
            "standard" => OcrEngine::Standard,
            "premium" => OcrEngine::Premium,
            other => OcrEngine::Unrecognized(other.to_owned()),
        }
    }
}

static OCR_SUBMIT_PARAMS: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "OcrSubmitParams",
        vec![
            FieldSpec::required("document_id", "document_id", FieldKind::Scalar(Scalar::String)),
            FieldSpec::optional("engine", "engine", FieldKind::Enum(OcrEngine::MEMBERS)),
            FieldSpec::optional(
                "languages",
                "languages",
                FieldKind::List(Box::new(FieldKind::Scalar(Scalar::String))),
            ),
            FieldSpec::optional("callback_url", "callback_url", FieldKind::Scalar(Scalar::String))
                .nullable(),
        ],
    )
});

/// Request body for submitting a stored document to OCR.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrSubmitParams {
    inner: ModelInstance,
}

impl OcrSubmitParams {
    pub fn spec() -> &'static ModelSpec {
        &OCR_SUBMIT_PARAMS
    }

    pub fn new(document_id: impl Into<String>) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("document_id", FieldValue::Str(document_id.into()));
        OcrSubmitParams { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| OcrSubmitParams { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn document_id(&self) -> &str {
        self.inner
            .get("document_id")
            .and_then(FieldValue::as_str)
            .expect("document_id is required")
    }

    pub fn engine(&self) -> Option<OcrEngine> {
        self.inner
            .get("engine")
            .and_then(FieldValue::as_symbol)
            .map(OcrEngine::from)
    }

    pub fn languages(&self) -> Option<Vec<&str>> {
        self.inner.get("languages").and_then(FieldValue::as_list).map(|items| {
            items.iter().filter_map(FieldValue::as_str).collect()
        })
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.inner.get("callback_url").and_then(FieldValue::as_str)
    }

    pub fn with_engine(&self, engine: OcrEngine) -> Self {
        OcrSubmitParams {
            inner: self
                .inner
                .clone()
                .put("engine", FieldValue::Symbol(engine.as_str().to_owned())),
        }
    }

    pub fn with_languages(&self, languages: Vec<String>) -> Self {
        let items = languages.into_iter().map(FieldValue::Str).collect();
        OcrSubmitParams {
            inner: self.inner.clone().put("languages", FieldValue::List(items)),
        }
    }

    pub fn with_callback_url(&self, url: impl Into<String>) -> Self {
        OcrSubmitParams {
            inner: self.inner.clone().put("callback_url", FieldValue::Str(url.into())),
        }
    }

    /// Explicitly disables the callback, as opposed to leaving it unset.
    pub fn with_callback_url_null(&self) -> Self {
        OcrSubmitParams {
            inner: self.inner.clone().put_null("callback_url"),
        }
    }
}

static OCR_JOB: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "OcrJob",
        vec![
            FieldSpec::required("job_id", "job_id", FieldKind::Scalar(Scalar::String)),
            FieldSpec::required("status", "status", FieldKind::Enum(JobStatus::MEMBERS)),
            FieldSpec::optional("page_count", "page_count", FieldKind::Scalar(Scalar::Int)),
            FieldSpec::optional("confidence", "confidence", FieldKind::Scalar(Scalar::Float)),
            FieldSpec::optional("completed_at", "completed_at", FieldKind::Scalar(Scalar::DateTime))
                .nullable(),
            FieldSpec::optional("error", "error", FieldKind::Model(ApiIssue::spec)).nullable(),
        ],
    )
});

/// An OCR job as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrJob {
    inner: ModelInstance,
}

impl OcrJob {
    pub fn spec() -> &'static ModelSpec {
        &OCR_JOB
    }

    pub fn new(job_id: impl Into<String>, status: JobStatus) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("job_id", FieldValue::Str(job_id.into()))
            .put("status", FieldValue::Symbol(status.as_str().to_owned()));
        OcrJob { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| OcrJob { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn job_id(&self) -> &str {
        self.inner
            .get("job_id")
            .and_then(FieldValue::as_str)
            .expect("job_id is required")
    }

    pub fn status(&self) -> JobStatus {
        self.inner
            .get("status")
            .and_then(FieldValue::as_symbol)
            .map(JobStatus::from)
            .expect("status is required")
    }

    pub fn page_count(&self) -> Option<i64> {
        self.inner.get("page_count").and_then(FieldValue::as_int)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.inner.get("confidence").and_then(FieldValue::as_float)
    }

    pub fn completed_at(&self) -> Option<&DateTime<FixedOffset>> {
        self.inner.get("completed_at").and_then(FieldValue::as_datetime)
    }

    pub fn error(&self) -> Option<ApiIssue> {
        self.inner
            .get("error")
            .and_then(FieldValue::as_model)
            .map(|m| ApiIssue::from_instance(m.clone()))
    }

    pub fn with_page_count(&self, page_count: i64) -> Self {
        OcrJob {
            inner: self.inner.clone().put("page_count", FieldValue::Int(page_count)),
        }
    }

    pub fn with_confidence(&self, confidence: f64) -> Self {
        OcrJob {
            inner: self.inner.clone().put("confidence", FieldValue::Float(confidence)),
        }
    }

    pub fn with_completed_at(&self, completed_at: DateTime<FixedOffset>) -> Self {
        OcrJob {
            inner: self
                .inner
                .clone()
                .put("completed_at", FieldValue::DateTime(completed_at)),
        }
    }

    pub fn with_completed_at_null(&self) -> Self {
        OcrJob {
            inner: self.inner.clone().put_null("completed_at"),
        }
    }

    pub fn with_error(&self, error: ApiIssue) -> Self {
        OcrJob {
            inner: self
                .inner
                .clone()
                .put("error", FieldValue::Model(error.instance().clone())),
        }
    }

    pub fn with_error_null(&self) -> Self {
        OcrJob {
            inner: self.inner.clone().put_null("error"),
        }
    }
}
