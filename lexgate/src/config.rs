//! Client configuration: where the API lives and how to authenticate.
//!
//! One [`Configuration`] is shared by every service client, usually behind an
//! `Arc`. It owns the `reqwest` client (and with it the connection pool),
//! the base URL, the API key and the user agent. All transport decoration
//! (auth header, user agent, timeout) happens here so the service clients
//! stay one-call-per-method thin.

use std::env;
use std::time::Duration;

use lexgate_core::contract::ApiError;
use serde_json::Value;

const BASE_URL_VAR: &str = "LEXGATE_BASE_URL";
const API_KEY_VAR: &str = "LEXGATE_API_KEY";

pub struct Configuration {
    base_url: String,
    api_key: Option<String>,
    user_agent: String,
    client: reqwest::Client,
}

impl Configuration {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Configuration {
            base_url,
            api_key: None,
            user_agent: format!("lexgate-rs/{}", env!("CARGO_PKG_VERSION")),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Applies a request timeout by rebuilding the underlying HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ApiError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Builds a configuration from `LEXGATE_BASE_URL` and `LEXGATE_API_KEY`,
    /// loading a `.env` file first when one is present.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();
        match (env::var(BASE_URL_VAR), env::var(API_KEY_VAR)) {
            (Ok(base_url), Ok(api_key)) => {
                tracing::info!(
                    base_url = %base_url,
                    api_key_set = !api_key.is_empty(),
                    "Initialized configuration from environment"
                );
                Ok(Configuration::new(base_url).with_api_key(api_key))
            }
            (Err(e), _) => {
                tracing::error!(error = ?e, "{BASE_URL_VAR} missing in environment");
                Err(Box::new(e))
            }
            (_, Err(e)) => {
                tracing::error!(error = ?e, "{API_KEY_VAR} missing in environment");
                Err(Box::new(e))
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .client
            .request(method, url)
            .header(reqwest::header::USER_AGENT, &self.user_agent);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("X-Api-Key", api_key);
        }
        builder
    }

    /// Sends the request, enforces a success status, and parses the body as
    /// a JSON tree for the model layer to decode.
    pub(crate) async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Value, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "API request failed");
            return Err(format!("API error: HTTP {status}: {body}").into());
        }
        Ok(response.json::<Value>().await?)
    }

    /// Like [`execute`](Self::execute) for endpoints that answer with an
    /// empty body.
    pub(crate) async fn execute_no_content(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<(), ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "API request failed");
            return Err(format!("API error: HTTP {status}: {body}").into());
        }
        Ok(())
    }
}
