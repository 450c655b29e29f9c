//! Wire types for the payments service (escrow-style holds).

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::decode::decode;
use crate::encode::encode;
use crate::error::DecodeError;
use crate::instance::ModelInstance;
use crate::schema::{FieldKind, FieldSpec, ModelSpec, Scalar};
use crate::value::FieldValue;

/// Lifecycle state of a hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoldStatus {
    Pending,
    Captured,
    Released,
    Expired,
    Unrecognized(String),
}

impl HoldStatus {
    pub const MEMBERS: &'static [&'static str] = &["pending", "captured", "released", "expired"];

    pub fn as_str(&self) -> &str {
        match self {
            HoldStatus::Pending => "pending",
            HoldStatus::Captured => "captured",
            HoldStatus::Released => "released",
            HoldStatus::Expired => "expired",
            HoldStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for HoldStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "pending" => HoldStatus::Pending,
            "captured" => HoldStatus::Captured,
            "released" => HoldStatus::Released,
            "expired" => HoldStatus::Expired,
            other => HoldStatus::Unrecognized(other.to_owned()),
        }
    }
}

fn metadata_kind() -> FieldKind {
    FieldKind::Map(Box::new(FieldKind::Scalar(Scalar::Any)))
}

fn metadata_value(metadata: BTreeMap<String, Value>) -> FieldValue {
    FieldValue::Map(
        metadata
            .into_iter()
            .map(|(key, value)| (key, FieldValue::Any(value)))
            .collect(),
    )
}

static HOLD_PARAMS: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "HoldParams",
        vec![
            FieldSpec::required("amount", "amount", FieldKind::Scalar(Scalar::Int)),
            FieldSpec::required("currency", "currency", FieldKind::Scalar(Scalar::String)),
            FieldSpec::required(
                "destination_account_id",
                "destination_account_id",
                FieldKind::Scalar(Scalar::String),
            ),
            FieldSpec::optional("metadata", "metadata", metadata_kind()),
        ],
    )
});

/// Request body for placing a hold, amount in minor units.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldParams {
    inner: ModelInstance,
}

impl HoldParams {
    pub fn spec() -> &'static ModelSpec {
        &HOLD_PARAMS
    }

    pub fn new(
        amount: i64,
        currency: impl Into<String>,
        destination_account_id: impl Into<String>,
    ) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("amount", FieldValue::Int(amount))
            .put("currency", FieldValue::Str(currency.into()))
            .put(
                "destination_account_id",
                FieldValue::Str(destination_account_id.into()),
            );
        HoldParams { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| HoldParams { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn amount(&self) -> i64 {
        self.inner
            .get("amount")
            .and_then(FieldValue::as_int)
            .expect("amount is required")
    }

    pub fn currency(&self) -> &str {
        self.inner
            .get("currency")
            .and_then(FieldValue::as_str)
            .expect("currency is required")
    }

    pub fn destination_account_id(&self) -> &str {
        self.inner
            .get("destination_account_id")
            .and_then(FieldValue::as_str)
            .expect("destination_account_id is required")
    }

    pub fn metadata(&self) -> Option<&BTreeMap<String, FieldValue>> {
        self.inner.get("metadata").and_then(FieldValue::as_map)
    }

    pub fn with_metadata(&self, metadata: BTreeMap<String, Value>) -> Self {
        HoldParams {
            inner: self.inner.clone().put("metadata", metadata_value(metadata)),
        }
    }
}

static CAPTURE_PARAMS: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "CaptureParams",
        vec![FieldSpec::optional("amount", "amount", FieldKind::Scalar(Scalar::Int))],
    )
});

/// Request body for capturing a hold. An unset amount captures in full.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureParams {
    inner: ModelInstance,
}

impl CaptureParams {
    pub fn spec() -> &'static ModelSpec {
        &CAPTURE_PARAMS
    }

    pub fn new() -> Self {
        CaptureParams {
            inner: ModelInstance::new(Self::spec()),
        }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| CaptureParams { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn amount(&self) -> Option<i64> {
        self.inner.get("amount").and_then(FieldValue::as_int)
    }

    pub fn with_amount(&self, amount: i64) -> Self {
        CaptureParams {
            inner: self.inner.clone().put("amount", FieldValue::Int(amount)),
        }
    }
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self::new()
    }
}

static HOLD: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Hold",
        vec![
            FieldSpec::required("hold_id", "hold_id", FieldKind::Scalar(Scalar::String)),
            FieldSpec::required("status", "status", FieldKind::Enum(HoldStatus::MEMBERS)),
            FieldSpec::required("amount", "amount", FieldKind::Scalar(Scalar::Int)),
            FieldSpec::required("currency", "currency", FieldKind::Scalar(Scalar::String)),
            FieldSpec::optional("created_at", "created_at", FieldKind::Scalar(Scalar::DateTime)),
            FieldSpec::optional("metadata", "metadata", metadata_kind()),
        ],
    )
});

/// A hold as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Hold {
    inner: ModelInstance,
}

impl Hold {
    pub fn spec() -> &'static ModelSpec {
        &HOLD
    }

    pub fn new(
        hold_id: impl Into<String>,
        status: HoldStatus,
        amount: i64,
        currency: impl Into<String>,
    ) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("hold_id", FieldValue::Str(hold_id.into()))
            .put("status", FieldValue::Symbol(status.as_str().to_owned()))
            .put("amount", FieldValue::Int(amount))
            .put("currency", FieldValue::Str(currency.into()));
        Hold { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| Hold { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn hold_id(&self) -> &str {
        self.inner
            .get("hold_id")
            .and_then(FieldValue::as_str)
            .expect("hold_id is required")
    }

    pub fn status(&self) -> HoldStatus {
        self.inner
            .get("status")
            .and_then(FieldValue::as_symbol)
            .map(HoldStatus::from)
            .expect("status is required")
    }

    pub fn amount(&self) -> i64 {
        self.inner
            .get("amount")
            .and_then(FieldValue::as_int)
            .expect("amount is required")
    }

    pub fn currency(&self) -> &str {
        self.inner
            .get("currency")
            .and_then(FieldValue::as_str)
            .expect("currency is required")
    }

    pub fn created_at(&self) -> Option<&DateTime<FixedOffset>> {
        self.inner.get("created_at").and_then(FieldValue::as_datetime)
    }

    pub fn metadata(&self) -> Option<&BTreeMap<String, FieldValue>> {
        self.inner.get("metadata").and_then(FieldValue::as_map)
    }

    pub fn with_created_at(&self, created_at: DateTime<FixedOffset>) -> Self {
        Hold {
            inner: self
                .inner
                .clone()
                .put("created_at", FieldValue::DateTime(created_at)),
        }
    }

    pub fn with_metadata(&self, metadata: BTreeMap<String, Value>) -> Self {
        Hold {
            inner: self.inner.clone().put("metadata", metadata_value(metadata)),
        }
    }
}
