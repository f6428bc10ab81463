//! Configuration for the remote resync API
//!
//! Supports loading the API endpoint from (in order of priority):
//! 1. An explicit JSON file
//! 2. `api.json` in the resync config directory
//! 3. Runtime environment variables (fallback)

use anyhow::{Context, Result};
use ::config::ConfigDir;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// API config filename in the resync config directory
pub const API_CONFIG_FILE: &str = "api.json";

const ENV_API_URL: &str = "RESYNC_API_URL";
const ENV_API_TOKEN: &str = "RESYNC_API_TOKEN";

fn default_timeout_secs() -> u64 {
    30
}

/// Where and how to reach the GraphQL API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint URL
    pub endpoint: Url,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Overall request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load config from the user's config directory, falling back to env vars
    pub fn load() -> Result<Self> {
        match ConfigDir::user() {
            Some(dir) => Self::load_from(&dir),
            None => Self::from_env(),
        }
    }

    /// Load config from `dir`, falling back to env vars
    pub fn load_from(dir: &ConfigDir) -> Result<Self> {
        if let Some(config) = dir.load_json_opt::<Self>(API_CONFIG_FILE)? {
            return Ok(config);
        }
        Self::from_env()
    }

    /// Load config from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        ::config::load_json_file(path)
    }

    /// Parse config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse API config JSON")
    }

    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(ENV_API_URL)
            .with_context(|| format!("{} environment variable not set", ENV_API_URL))?;
        let token = std::env::var(ENV_API_TOKEN).ok().filter(|t| !t.is_empty());
        Self::from_parts(&endpoint, token)
    }

    fn from_parts(endpoint: &str, token: Option<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid API endpoint URL: {}", endpoint))?;
        Ok(Self {
            endpoint,
            token,
            timeout_secs: default_timeout_secs(),
        })
    }

    /// Write this config to `dir`
    pub fn save_to(&self, dir: &ConfigDir) -> Result<()> {
        dir.save_json(API_CONFIG_FILE, self)
    }
}
