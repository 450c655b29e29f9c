use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use sha2::{Digest, Sha256};

use lexgate_core::contract::{ApiError, Vault};
use lexgate_core::models::vault::{PutObjectParams, VaultObject, VaultObjectPage};

use crate::config::Configuration;

/// Client for the vault (object storage) service.
pub struct VaultClient {
    conf: Arc<Configuration>,
}

impl VaultClient {
    pub fn new(conf: Arc<Configuration>) -> Self {
        VaultClient { conf }
    }
}

#[async_trait]
impl Vault for VaultClient {
    async fn put_object(&self, params: PutObjectParams) -> Result<VaultObject, ApiError> {
        // Fill the integrity digest unless the caller pinned one themselves.
        let params = if params.content_sha256().is_none() {
            let digest = {
                let mut hasher = Sha256::new();
                hasher.update(params.content().as_bytes());
                format!("{:x}", hasher.finalize())
            };
            params.with_content_sha256(digest)
        } else {
            params
        };

        tracing::info!(
            key = params.key(),
            content_sha256 = params.content_sha256().unwrap_or_default(),
            "Storing vault object"
        );
        let request = self
            .conf
            .request(Method::POST, "/v1/vault/objects")
            .json(&params.to_wire());
        let payload = self.conf.execute(request).await?;
        match VaultObject::from_wire(&payload) {
            Ok(object) => {
                tracing::info!(
                    key = object.key(),
                    size_bytes = object.size_bytes(),
                    "Vault object stored"
                );
                Ok(object)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode vault object payload");
                Err(Box::new(e))
            }
        }
    }

    async fn get_object(&self, key: &str) -> Result<VaultObject, ApiError> {
        tracing::info!(key, "Fetching vault object metadata");
        let request = self
            .conf
            .request(Method::GET, &format!("/v1/vault/objects/{key}"));
        let payload = self.conf.execute(request).await?;
        match VaultObject::from_wire(&payload) {
            Ok(object) => {
                tracing::info!(key = object.key(), "Fetched vault object metadata");
                Ok(object)
            }
            Err(e) => {
                tracing::error!(error = %e, key, "Failed to decode vault object payload");
                Err(Box::new(e))
            }
        }
    }

    async fn list_objects(
        &self,
        prefix: Option<String>,
        page_token: Option<String>,
    ) -> Result<VaultObjectPage, ApiError> {
        tracing::info!(prefix = prefix.as_deref().unwrap_or(""), "Listing vault objects");
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(prefix) = prefix.as_deref() {
            query.push(("prefix", prefix));
        }
        if let Some(page_token) = page_token.as_deref() {
            query.push(("page_token", page_token));
        }
        let request = self
            .conf
            .request(Method::GET, "/v1/vault/objects")
            .query(&query);
        let payload = self.conf.execute(request).await?;
        match VaultObjectPage::from_wire(&payload) {
            Ok(page) => {
                tracing::info!(
                    count = page.items().len(),
                    more = page.next_token().is_some(),
                    "Listed vault objects"
                );
                Ok(page)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode vault listing payload");
                Err(Box::new(e))
            }
        }
    }

    async fn delete_object(&self, key: &str) -> Result<(), ApiError> {
        tracing::info!(key, "Deleting vault object");
        let request = self
            .conf
            .request(Method::DELETE, &format!("/v1/vault/objects/{key}"));
        self.conf.execute_no_content(request).await?;
        tracing::info!(key, "Vault object deleted");
        Ok(())
    }
}
