//! Loads the static YAML client configuration used by the CLI.
//!
//! Only non-secret settings live in the file (API location, timeout); the
//! API key always comes from the environment. This module is the single
//! place where user-supplied YAML is parsed into typed structs, and every
//! failure is turned into a clear, contextual error for the CLI boundary.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    pub api: ApiSection,
}

#[derive(Debug, Deserialize)]
pub struct ApiSection {
    /// Root of the platform API, e.g. `https://api.lexgate.io`.
    pub base_url: String,
    /// Request timeout; unset means the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Loads a static YAML config file. Secrets are injected from the
/// environment elsewhere; this file never contains them.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let config: CliConfig = match serde_yaml::from_str(&config_content) {
        Ok(config) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            config
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    Ok(config)
}
