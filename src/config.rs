//! Configuration handling for the TUI

use crate::state::InstanceType;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV_VAR: &str = "EC2_REQUEST_ENDPOINT";

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str =
    "https://YOUR_API_GATEWAY_ID.execute-api.ap-southeast-5.amazonaws.com/request";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RequestConfig {
    /// Request endpoint URL
    pub endpoint: Option<String>,
    /// Instance type preselected in the form
    pub default_instance_type: Option<String>,
}

impl RequestConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "ec2-request", "ec2-request-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: RequestConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Resolve the endpoint: environment override, then config, then default
    pub fn resolve_endpoint(&self) -> String {
        self.endpoint_with_override(std::env::var(ENDPOINT_ENV_VAR).ok())
    }

    fn endpoint_with_override(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// The instance type to preselect; unknown values fall back to the default
    pub fn instance_type(&self) -> InstanceType {
        match self.default_instance_type.as_deref() {
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(value, "Unknown default instance type in config");
                InstanceType::default()
            }),
            None => InstanceType::default(),
        }
    }
}
