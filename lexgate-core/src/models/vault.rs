//! Wire types for the vault (object storage) service.

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

fn tags_kind() -> FieldKind {
    FieldKind::Map(Box::new(FieldKind::Scalar(Scalar::String)))
}

static PUT_OBJECT_PARAMS: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "PutObjectParams",
        vec![
            FieldSpec::required("key", "key", FieldKind::Scalar(Scalar::String)),
            FieldSpec::required("content", "content", FieldKind::Scalar(Scalar::String)),
            FieldSpec::optional("content_type", "content_type", FieldKind::Scalar(Scalar::String))
                .nullable(),
            FieldSpec::optional(
                "content_sha256",
                "content_sha256",
                FieldKind::Scalar(Scalar::String),
            ),
            FieldSpec::optional("tags", "tags", tags_kind()),
        ],
    )
});

/// Request body for storing an object. Content travels as UTF-8 text; the
/// client fills `content_sha256` before sending when the caller has not.
#[derive(Debug, Clone, PartialEq)]
pub struct PutObjectParams {
    inner: ModelInstance,
}

impl PutObjectParams {
    pub fn spec() -> &'static ModelSpec {
        &PUT_OBJECT_PARAMS
    }

    pub fn new(key: impl Into<String>, content: impl Into<String>) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("key", FieldValue::Str(key.into()))
            .put("content", FieldValue::Str(content.into()));
        PutObjectParams { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| PutObjectParams { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn key(&self) -> &str {
        self.inner
            .get("key")
            .and_then(FieldValue::as_str)
            .expect("key is required")
    }

    pub fn content(&self) -> &str {
        self.inner
            .get("content")
            .and_then(FieldValue::as_str)
            .expect("content is required")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.inner.get("content_type").and_then(FieldValue::as_str)
    }

    pub fn content_sha256(&self) -> Option<&str> {
        self.inner.get("content_sha256").and_then(FieldValue::as_str)
    }

    pub fn tags(&self) -> Option<&BTreeMap<String, FieldValue>> {
        self.inner.get("tags").and_then(FieldValue::as_map)
    }

    pub fn with_content_type(&self, content_type: impl Into<String>) -> Self {
        PutObjectParams {
            inner: self
                .inner
                .clone()
                .put("content_type", FieldValue::Str(content_type.into())),
        }
    }

    pub fn with_content_type_null(&self) -> Self {
        PutObjectParams {
            inner: self.inner.clone().put_null("content_type"),
        }
    }

    pub fn with_content_sha256(&self, digest: impl Into<String>) -> Self {
        PutObjectParams {
            inner: self
                .inner
                .clone()
                .put("content_sha256", FieldValue::Str(digest.into())),
        }
    }

    pub fn with_tags(&self, tags: BTreeMap<String, String>) -> Self {
        let entries = tags
            .into_iter()
            .map(|(key, value)| (key, FieldValue::Str(value)))
            .collect();
        PutObjectParams {
            inner: self.inner.clone().put("tags", FieldValue::Map(entries)),
        }
    }
}

static VAULT_OBJECT: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "VaultObject",
        vec![
            FieldSpec::required("key", "key", FieldKind::Scalar(Scalar::String)),
            FieldSpec::required("size_bytes", "size_bytes", FieldKind::Scalar(Scalar::Int)),
            FieldSpec::optional(
                "content_sha256",
                "content_sha256",
                FieldKind::Scalar(Scalar::String),
            ),
            FieldSpec::optional("content_type", "content_type", FieldKind::Scalar(Scalar::String))
                .nullable(),
            FieldSpec::optional("created_at", "created_at", FieldKind::Scalar(Scalar::DateTime)),
            FieldSpec::optional("tags", "tags", tags_kind()),
        ],
    )
});

/// Stored object metadata as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultObject {
    inner: ModelInstance,
}

impl VaultObject {
    pub fn spec() -> &'static ModelSpec {
        &VAULT_OBJECT
    }

    pub fn new(key: impl Into<String>, size_bytes: i64) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("key", FieldValue::Str(key.into()))
            .put("size_bytes", FieldValue::Int(size_bytes));
        VaultObject { inner }
    }

    pub(crate) fn from_instance(inner: ModelInstance) -> Self {
        debug_assert!(std::ptr::eq(inner.spec(), Self::spec()));
        VaultObject { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| VaultObject { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn key(&self) -> &str {
        self.inner
            .get("key")
            .and_then(FieldValue::as_str)
            .expect("key is required")
    }

    pub fn size_bytes(&self) -> i64 {
        self.inner
            .get("size_bytes")
            .and_then(FieldValue::as_int)
            .expect("size_bytes is required")
    }

    pub fn content_sha256(&self) -> Option<&str> {
        self.inner.get("content_sha256").and_then(FieldValue::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.inner.get("content_type").and_then(FieldValue::as_str)
    }

    pub fn created_at(&self) -> Option<&DateTime<FixedOffset>> {
        self.inner.get("created_at").and_then(FieldValue::as_datetime)
    }

    pub fn tags(&self) -> Option<&BTreeMap<String, FieldValue>> {
        self.inner.get("tags").and_then(FieldValue::as_map)
    }

    pub fn with_content_sha256(&self, digest: impl Into<String>) -> Self {
        VaultObject {
            inner: self
                .inner
                .clone()
                .put("content_sha256", FieldValue::Str(digest.into())),
        }
    }

    pub fn with_content_type(&self, content_type: impl Into<String>) -> Self {
        VaultObject {
            inner: self
                .inner
                .clone()
                .put("content_type", FieldValue::Str(content_type.into())),
        }
    }

    pub fn with_content_type_null(&self) -> Self {
        VaultObject {
            inner: self.inner.clone().put_null("content_type"),
        }
    }

    pub fn with_created_at(&self, created_at: DateTime<FixedOffset>) -> Self {
        VaultObject {
            inner: self
                .inner
                .clone()
                .put("created_at", FieldValue::DateTime(created_at)),
        }
    }

    pub fn with_tags(&self, tags: BTreeMap<String, String>) -> Self {
        let entries = tags
            .into_iter()
            .map(|(key, value)| (key, FieldValue::Str(value)))
            .collect();
        VaultObject {
            inner: self.inner.clone().put("tags", FieldValue::Map(entries)),
        }
    }
}

static VAULT_OBJECT_PAGE: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "VaultObjectPage",
        vec![
            FieldSpec::required(
                "items",
                "items",
                FieldKind::List(Box::new(FieldKind::Model(VaultObject::spec))),
            ),
            FieldSpec::optional("next_token", "next_token", FieldKind::Scalar(Scalar::String))
                .nullable(),
        ],
    )
});

/// One page of a vault listing.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultObjectPage {
    inner: ModelInstance,
}

impl VaultObjectPage {
    pub fn spec() -> &'static ModelSpec {
        &VAULT_OBJECT_PAGE
    }

    pub fn new(items: Vec<VaultObject>) -> Self {
        let items = items
            .into_iter()
            .map(|object| FieldValue::Model(object.instance().clone()))
            .collect();
        let inner = ModelInstance::new(Self::spec()).put("items", FieldValue::List(items));
        VaultObjectPage { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| VaultObjectPage { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn items(&self) -> Vec<VaultObject> {
        self.inner
            .get("items")
            .and_then(FieldValue::as_list)
            .map(|items| {
                items
                    .iter()
                    .filter_map(FieldValue::as_model)
                    .map(|m| VaultObject::from_instance(m.clone()))
                    .collect()
            })
            .expect("items is required")
    }

    pub fn next_token(&self) -> Option<&str> {
        self.inner.get("next_token").and_then(FieldValue::as_str)
    }

    pub fn with_next_token(&self, next_token: impl Into<String>) -> Self {
        VaultObjectPage {
            inner: self
                .inner
                .clone()
                .put("next_token", FieldValue::Str(next_token.into())),
        }
    }

    pub fn with_next_token_null(&self) -> Self {
        VaultObjectPage {
            inner: self.inner.clone().put_null("next_token"),
        }
    }
}
