use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use lexgate_core::contract::{ApiError, DocumentOcr};
use lexgate_core::models::ocr::{OcrJob, OcrSubmitParams};

use crate::config::Configuration;

/// Client for the document OCR service.
pub struct OcrClient {
    conf: Arc<Configuration>,
}

impl OcrClient {
    pub fn new(conf: Arc<Configuration>) -> Self {
        OcrClient { conf }
    }
}

#[async_trait]
impl DocumentOcr for OcrClient {
    async fn submit(&self, params: OcrSubmitParams) -> Result<OcrJob, ApiError> {
        tracing::info!(document_id = params.document_id(), "Submitting document for OCR");
        let request = self
            .conf
            .request(Method::POST, "/v1/ocr/jobs")
            .json(&params.to_wire());
        let payload = self.conf.execute(request).await?;
        match OcrJob::from_wire(&payload) {
            Ok(job) => {
                tracing::info!(
                    job_id = job.job_id(),
                    status = job.status().as_str(),
                    "OCR job accepted"
                );
                Ok(job)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode OCR job payload");
                Err(Box::new(e))
            }
        }
    }

    async fn get_job(&self, job_id: &str) -> Result<OcrJob, ApiError> {
        tracing::info!(job_id, "Fetching OCR job");
        let request = self
            .conf
            .request(Method::GET, &format!("/v1/ocr/jobs/{job_id}"));
        let payload = self.conf.execute(request).await?;
        match OcrJob::from_wire(&payload) {
            Ok(job) => {
                tracing::info!(job_id = job.job_id(), status = job.status().as_str(), "Fetched OCR job");
                Ok(job)
            }
            Err(e) => {
                tracing::error!(error = %e, job_id, "Failed to decode OCR job payload");
                Err(Box::new(e))
            }
        }
    }

    async fn cancel_job(&self, job_id: &str) -> Result<OcrJob, ApiError> {
        tracing::info!(job_id, "Cancelling OCR job");
        let request = self
            .conf
            .request(Method::POST, &format!("/v1/ocr/jobs/{job_id}/cancel"));
        let payload = self.conf.execute(request).await?;
        match OcrJob::from_wire(&payload) {
            Ok(job) => {
                tracing::info!(
                    job_id = job.job_id(),
                    status = job.status().as_str(),
                    "OCR job cancelled"
                );
                Ok(job)
            }
            Err(e) => {
                tracing::error!(error = %e, job_id, "Failed to decode OCR job payload");
                Err(Box::new(e))
            }
        }
    }
}
