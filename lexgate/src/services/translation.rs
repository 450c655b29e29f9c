use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use lexgate_core::contract::{ApiError, Translator};
use lexgate_core::models::translation::{TranslateParams, Translation};

use crate::config::Configuration;

/// Client for the translation service.
pub struct TranslationClient {
    conf: Arc<Configuration>,
}

impl TranslationClient {
    pub fn new(conf: Arc<Configuration>) -> Self {
        TranslationClient { conf }
    }
}

#[async_trait]
impl Translator for TranslationClient {
    async fn translate(&self, params: TranslateParams) -> Result<Translation, ApiError> {
        tracing::info!(
            target_lang = params.target_lang(),
            source_lang = params.source_lang().unwrap_or("auto"),
            "Requesting translation"
        );
        let request = self
            .conf
            .request(Method::POST, "/v1/translate")
            .json(&params.to_wire());
        let payload = self.conf.execute(request).await?;
        match Translation::from_wire(&payload) {
            Ok(translation) => {
                tracing::info!(
                    detected_lang = translation.detected_lang().unwrap_or("unknown"),
                    billed_characters = translation.billed_characters().unwrap_or(0),
                    "Translation complete"
                );
                Ok(translation)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode translation payload");
                Err(Box::new(e))
            }
        }
    }
}
