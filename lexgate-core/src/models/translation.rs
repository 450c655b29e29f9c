//! Wire types for the translation service.
//!
//! The `text` field is a union: a single string for one document, or a list
//! of strings for a batch. The server answers in the same shape it was asked
//! in, so both request and response carry the union.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::decode::decode;
use crate::encode::encode;
use crate::error::DecodeError;
use crate::instance::ModelInstance;
use crate::schema::{FieldKind, FieldSpec, ModelSpec, Scalar};
use crate::value::FieldValue;

/// One document or a batch, mirroring the wire union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationText {
    Single(String),
    Batch(Vec<String>),
}

impl From<&str> for TranslationText {
    fn from(text: &str) -> Self {
        TranslationText::Single(text.to_owned())
    }
}

impl From<String> for TranslationText {
    fn from(text: String) -> Self {
        TranslationText::Single(text)
    }
}

impl From<Vec<String>> for TranslationText {
    fn from(batch: Vec<String>) -> Self {
        TranslationText::Batch(batch)
    }
}

fn text_kind() -> FieldKind {
    FieldKind::Union(vec![
        FieldKind::Scalar(Scalar::String),
        FieldKind::List(Box::new(FieldKind::Scalar(Scalar::String))),
    ])
}

fn text_value(text: TranslationText) -> FieldValue {
    match text {
        TranslationText::Single(s) => FieldValue::Str(s),
        TranslationText::Batch(items) => {
            FieldValue::List(items.into_iter().map(FieldValue::Str).collect())
        }
    }
}

fn text_from_value(value: &FieldValue) -> Option<TranslationText> {
    match value {
        FieldValue::Str(s) => Some(TranslationText::Single(s.clone())),
        FieldValue::List(items) => Some(TranslationText::Batch(
            items
                .iter()
                .filter_map(FieldValue::as_str)
                .map(str::to_owned)
                .collect(),
        )),
        _ => None,
    }
}

static TRANSLATE_PARAMS: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "TranslateParams",
        vec![
            FieldSpec::required("text", "text", text_kind()),
            FieldSpec::required("target_lang", "target_lang", FieldKind::Scalar(Scalar::String)),
            FieldSpec::optional("source_lang", "source_lang", FieldKind::Scalar(Scalar::String))
                .nullable(),
            FieldSpec::optional("glossary_id", "glossary_id", FieldKind::Scalar(Scalar::String)),
        ],
    )
});

/// Request body for a translation call.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateParams {
    inner: ModelInstance,
}

impl TranslateParams {
    pub fn spec() -> &'static ModelSpec {
        &TRANSLATE_PARAMS
    }

    pub fn new(text: impl Into<TranslationText>, target_lang: impl Into<String>) -> Self {
        let inner = ModelInstance::new(Self::spec())
            .put("text", text_value(text.into()))
            .put("target_lang", FieldValue::Str(target_lang.into()));
        TranslateParams { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| TranslateParams { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn text(&self) -> TranslationText {
        self.inner
            .get("text")
            .and_then(text_from_value)
            .expect("text is required")
    }

    pub fn target_lang(&self) -> &str {
        self.inner
            .get("target_lang")
            .and_then(FieldValue::as_str)
            .expect("target_lang is required")
    }

    pub fn source_lang(&self) -> Option<&str> {
        self.inner.get("source_lang").and_then(FieldValue::as_str)
    }

    pub fn glossary_id(&self) -> Option<&str> {
        self.inner.get("glossary_id").and_then(FieldValue::as_str)
    }

    pub fn with_source_lang(&self, source_lang: impl Into<String>) -> Self {
        TranslateParams {
            inner: self
                .inner
                .clone()
                .put("source_lang", FieldValue::Str(source_lang.into())),
        }
    }

    /// Explicitly requests language auto-detection, as opposed to leaving the
    /// source language unset.
    pub fn with_source_lang_null(&self) -> Self {
        TranslateParams {
            inner: self.inner.clone().put_null("source_lang"),
        }
    }

    pub fn with_glossary_id(&self, glossary_id: impl Into<String>) -> Self {
        TranslateParams {
            inner: self
                .inner
                .clone()
                .put("glossary_id", FieldValue::Str(glossary_id.into())),
        }
    }
}

static TRANSLATION: Lazy<ModelSpec> = Lazy::new(|| {
    ModelSpec::new(
        "Translation",
        vec![
            FieldSpec::required("text", "text", text_kind()),
            FieldSpec::optional("detected_lang", "detected_lang", FieldKind::Scalar(Scalar::String)),
            FieldSpec::optional(
                "billed_characters",
                "billed_characters",
                FieldKind::Scalar(Scalar::Int),
            ),
        ],
    )
});

/// A finished translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    inner: ModelInstance,
}

impl Translation {
    pub fn spec() -> &'static ModelSpec {
        &TRANSLATION
    }

    pub fn new(text: impl Into<TranslationText>) -> Self {
        let inner = ModelInstance::new(Self::spec()).put("text", text_value(text.into()));
        Translation { inner }
    }

    pub fn from_wire(payload: &Value) -> Result<Self, DecodeError> {
        decode(payload, Self::spec()).map(|inner| Translation { inner })
    }

    pub fn to_wire(&self) -> Value {
        encode(&self.inner)
    }

    pub fn instance(&self) -> &ModelInstance {
        &self.inner
    }

    pub fn text(&self) -> TranslationText {
        self.inner
            .get("text")
            .and_then(text_from_value)
            .expect("text is required")
    }

    pub fn detected_lang(&self) -> Option<&str> {
        self.inner.get("detected_lang").and_then(FieldValue::as_str)
    }

    pub fn billed_characters(&self) -> Option<i64> {
        self.inner.get("billed_characters").and_then(FieldValue::as_int)
    }

    pub fn with_detected_lang(&self, detected_lang: impl Into<String>) -> Self {
        Translation {
            inner: self
                .inner
                .clone()
                .put("detected_lang", FieldValue::Str(detected_lang.into())),
        }
    }

    pub fn with_billed_characters(&self, billed_characters: i64) -> Self {
        Translation {
            inner: self
                .inner
                .clone()
                .put("billed_characters", FieldValue::Int(billed_characters)),
        }
    }
}
