//! Service contracts: the interface between the typed models and whatever
//! transport carries them.
//!
//! Each trait describes one platform service, one method per HTTP call.
//! Implementors live in the `lexgate` crate (real clients) and in test code
//! (mockall mocks, exported behind the `test-export-mocks` feature). The
//! traits are transport- and auth-agnostic: they speak typed models in and
//! typed models out, and report failures as boxed errors.

use async_trait::async_trait;
use futures::future::try_join_all;
use mockall::automock;

use crate::models::agents::{AgentRun, AgentRunParams};
use crate::models::ocr::{OcrJob, OcrSubmitParams};
use crate::models::payments::{CaptureParams, Hold, HoldParams};
use crate::models::translation::{TranslateParams, Translation};
use crate::models::vault::{PutObjectParams, VaultObject, VaultObjectPage};

/// Error type shared by all service contracts.
pub type ApiError = Box<dyn std::error::Error + Send + Sync>;

/// Document OCR: submit stored documents for recognition and poll the jobs.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocumentOcr: Send + Sync {
    /// Submit a stored document for recognition.
    async fn submit(&self, params: OcrSubmitParams) -> Result<OcrJob, ApiError>;

    /// Fetch the current state of a job.
    async fn get_job(&self, job_id: &str) -> Result<OcrJob, ApiError>;

    /// Cancel a job that has not completed.
    async fn cancel_job(&self, job_id: &str) -> Result<OcrJob, ApiError>;
}

/// Machine translation of one document or a batch.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, params: TranslateParams) -> Result<Translation, ApiError>;
}

/// Payments: escrow-style holds on client accounts.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Payments: Send + Sync {
    /// Place a hold. Implementors are expected to send an idempotency key.
    async fn create_hold(&self, params: HoldParams) -> Result<Hold, ApiError>;

    /// Capture a pending hold, in full or partially.
    async fn capture_hold(&self, hold_id: &str, params: CaptureParams) -> Result<Hold, ApiError>;

    /// Release a pending hold back to the payer.
    async fn release_hold(&self, hold_id: &str) -> Result<Hold, ApiError>;
}

/// Vault: object storage for case files and evidence.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Vault: Send + Sync {
    /// Store an object and return its metadata.
    async fn put_object(&self, params: PutObjectParams) -> Result<VaultObject, ApiError>;

    /// Fetch metadata for a single object.
    async fn get_object(&self, key: &str) -> Result<VaultObject, ApiError>;

    /// List objects, optionally filtered by key prefix, one page at a time.
    async fn list_objects(
        &self,
        prefix: Option<String>,
        page_token: Option<String>,
    ) -> Result<VaultObjectPage, ApiError>;

    /// Delete a single object.
    async fn delete_object(&self, key: &str) -> Result<(), ApiError>;
}

/// Agent execution: sandboxed autonomous runs.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait AgentRuns: Send + Sync {
    async fn start_run(&self, params: AgentRunParams) -> Result<AgentRun, ApiError>;

    async fn get_run(&self, run_id: &str) -> Result<AgentRun, ApiError>;

    async fn cancel_run(&self, run_id: &str) -> Result<AgentRun, ApiError>;
}

/// Deletes every vault object under `prefix`, page by page, returning how
/// many objects were removed. Deletions within a page run concurrently and
/// the whole operation fails fast on the first error.
pub async fn purge_prefix<C>(vault: &C, prefix: &str) -> Result<usize, ApiError>
where
    C: Vault + ?Sized,
{
    let mut deleted = 0usize;
    let mut page_token: Option<String> = None;
    loop {
        let page = vault
            .list_objects(Some(prefix.to_owned()), page_token.take())
            .await?;
        let keys: Vec<String> = page.items().iter().map(|o| o.key().to_owned()).collect();
        let deletions = keys.iter().map(|key| vault.delete_object(key));
        try_join_all(deletions).await?;
        deleted += keys.len();
        tracing::info!(prefix, batch = keys.len(), "Deleted a page of vault objects");
        match page.next_token() {
            Some(token) => page_token = Some(token.to_owned()),
            None => break,
        }
    }
    tracing::info!(prefix, deleted, "Purge complete");
    Ok(deleted)
}
