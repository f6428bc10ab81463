//! Coded failures reported by a resync

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured failure: a machine-readable code plus optional detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodedError {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CodedError {
    /// Code used when no structured detail is available
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            data: None,
            message: None,
        }
    }

    /// The sentinel for transport failures and malformed responses
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.code == Self::UNKNOWN
    }

    /// Catalog entry for this code
    pub fn kind(&self) -> SyncErrorCode {
        SyncErrorCode::from_code(&self.code)
    }
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.code, message),
            None => f.write_str(&self.code),
        }
    }
}

/// Known sync failure codes, for rendering a headline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncErrorCode {
    Unknown,
    InvalidUrl,
    Unreachable,
    UrlNotFound,
    NotSdk,
    AppMismatch,
    SigningKeyInvalid,
    Forbidden,
    DeploymentProtected,
    InternalServerError,
    Other(String),
}

impl SyncErrorCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            CodedError::UNKNOWN => Self::Unknown,
            "invalid_url" => Self::InvalidUrl,
            "unreachable" => Self::Unreachable,
            "url_not_found" => Self::UrlNotFound,
            "not_sdk" => Self::NotSdk,
            "app_mismatch" => Self::AppMismatch,
            "signing_key_invalid" => Self::SigningKeyInvalid,
            "forbidden" => Self::Forbidden,
            "deployment_protected" => Self::DeploymentProtected,
            "internal_server_error" => Self::InternalServerError,
            other => Self::Other(other.to_string()),
        }
    }

    /// One-line headline for the failure-detail view
    pub fn headline(&self) -> &str {
        match self {
            Self::Unknown => "Something went wrong while syncing the app",
            Self::InvalidUrl => "The URL is not valid",
            Self::Unreachable => "The app could not be reached",
            Self::UrlNotFound => "Nothing was found at the URL",
            Self::NotSdk => "The URL does not point at an SDK endpoint",
            Self::AppMismatch => "The URL serves a different app",
            Self::SigningKeyInvalid => "The app rejected the signing key",
            Self::Forbidden => "The app refused the sync request",
            Self::DeploymentProtected => "The deployment is protected and refused the request",
            Self::InternalServerError => "The app returned a server error",
            Self::Other(_) => "The sync failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sentinel() {
        let err = CodedError::unknown();
        assert!(err.is_unknown());
        assert_eq!(err.kind(), SyncErrorCode::Unknown);
        assert_eq!(err.to_string(), "unknown");
    }

    #[test]
    fn test_parse_without_optional_fields() {
        let err: CodedError =
            serde_json::from_str(r#"{ "code": "invalid_url", "message": "bad host" }"#).unwrap();
        assert_eq!(err, CodedError::new("invalid_url").with_message("bad host"));
        assert_eq!(err.to_string(), "invalid_url: bad host");
    }

    #[test]
    fn test_null_fields_become_none() {
        let err: CodedError =
            serde_json::from_str(r#"{ "code": "forbidden", "data": null, "message": null }"#)
                .unwrap();
        assert!(err.data.is_none());
        assert!(err.message.is_none());
        assert_eq!(err.kind(), SyncErrorCode::Forbidden);
    }

    #[test]
    fn test_unrecognized_code_is_preserved() {
        let kind = SyncErrorCode::from_code("brand_new_code");
        assert_eq!(kind, SyncErrorCode::Other("brand_new_code".to_string()));
        assert_eq!(kind.headline(), "The sync failed");
    }
}
