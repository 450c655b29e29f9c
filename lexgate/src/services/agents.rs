use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use lexgate_core::contract::{AgentRuns, ApiError};
use lexgate_core::models::agents::{AgentRun, AgentRunParams};

use crate::config::Configuration;

/// Client for the agent execution service.
pub struct AgentsClient {
    conf: Arc<Configuration>,
}

impl AgentsClient {
    pub fn new(conf: Arc<Configuration>) -> Self {
        AgentsClient { conf }
    }
}

#[async_trait]
impl AgentRuns for AgentsClient {
    async fn start_run(&self, params: AgentRunParams) -> Result<AgentRun, ApiError> {
        tracing::info!(agent_id = params.agent_id(), "Starting agent run");
        let request = self
            .conf
            .request(Method::POST, "/v1/agents/runs")
            .json(&params.to_wire());
        let payload = self.conf.execute(request).await?;
        match AgentRun::from_wire(&payload) {
            Ok(run) => {
                tracing::info!(
                    run_id = run.run_id(),
                    status = run.status().as_str(),
                    "Agent run started"
                );
                Ok(run)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode agent run payload");
                Err(Box::new(e))
            }
        }
    }

    async fn get_run(&self, run_id: &str) -> Result<AgentRun, ApiError> {
        tracing::info!(run_id, "Fetching agent run");
        let request = self
            .conf
            .request(Method::GET, &format!("/v1/agents/runs/{run_id}"));
        let payload = self.conf.execute(request).await?;
        match AgentRun::from_wire(&payload) {
            Ok(run) => {
                tracing::info!(run_id = run.run_id(), status = run.status().as_str(), "Fetched agent run");
                Ok(run)
            }
            Err(e) => {
                tracing::error!(error = %e, run_id, "Failed to decode agent run payload");
                Err(Box::new(e))
            }
        }
    }

    async fn cancel_run(&self, run_id: &str) -> Result<AgentRun, ApiError> {
        tracing::info!(run_id, "Cancelling agent run");
        let request = self
            .conf
            .request(Method::POST, &format!("/v1/agents/runs/{run_id}/cancel"));
        let payload = self.conf.execute(request).await?;
        match AgentRun::from_wire(&payload) {
            Ok(run) => {
                tracing::info!(
                    run_id = run.run_id(),
                    status = run.status().as_str(),
                    "Agent run cancelled"
                );
                Ok(run)
            }
            Err(e) => {
                tracing::error!(error = %e, run_id, "Failed to decode agent run payload");
                Err(Box::new(e))
            }
        }
    }
}
