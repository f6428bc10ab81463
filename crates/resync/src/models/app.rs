//! Registered application as seen by the resync dialog

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the environment the app is registered in
pub type EnvironmentId = uuid::Uuid;

/// External identifier the app registered itself with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppExternalId(pub String);

impl AppExternalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AppExternalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for AppExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-assigned app identifier, returned by a successful resync
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AppId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the app is connected to the platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppMethod {
    /// Pull-based: the platform calls the app's HTTP endpoint
    #[default]
    Serve,
    /// Persistent outbound connection opened by the app
    Connect,
}

impl AppMethod {
    /// A resync of a connected app is a migration back to serve
    pub fn is_migration(self) -> bool {
        matches!(self, AppMethod::Connect)
    }
}

/// Hosting platform that puts deployments behind an auth wall by default
pub const PLATFORM_VERCEL: &str = "vercel";

/// Snapshot of the app taken when the dialog opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSnapshot {
    pub external_id: AppExternalId,
    /// URL the app is currently served from
    pub url: String,
    #[serde(default)]
    pub method: AppMethod,
    /// Hosting platform reported by the SDK, if any
    #[serde(default)]
    pub platform: Option<String>,
}

impl AppSnapshot {
    pub fn new(external_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            external_id: AppExternalId::new(external_id),
            url: url.into(),
            method: AppMethod::Serve,
            platform: None,
        }
    }

    /// Builder method to set the connection method
    pub fn with_method(mut self, method: AppMethod) -> Self {
        self.method = method;
        self
    }

    /// Builder method to set the hosting platform
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn is_vercel(&self) -> bool {
        self.platform
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case(PLATFORM_VERCEL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_wire_names() {
        assert_eq!(serde_json::to_string(&AppMethod::Serve).unwrap(), "\"SERVE\"");
        let method: AppMethod = serde_json::from_str("\"CONNECT\"").unwrap();
        assert_eq!(method, AppMethod::Connect);
        assert!(method.is_migration());
        assert!(!AppMethod::Serve.is_migration());
    }

    #[test]
    fn test_snapshot_defaults() {
        let json = r#"{ "external_id": "my-app", "url": "https://a.com/api/inngest" }"#;
        let app: AppSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(app.external_id.as_str(), "my-app");
        assert_eq!(app.method, AppMethod::Serve);
        assert!(app.platform.is_none());
    }

    #[test]
    fn test_is_vercel() {
        let app = AppSnapshot::new("a", "https://a.vercel.app/api/inngest");
        assert!(!app.is_vercel());
        assert!(app.clone().with_platform("Vercel").is_vercel());
        assert!(!app.with_platform("render").is_vercel());
    }
}
