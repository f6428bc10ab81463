//! Resync request and response shapes

use serde::{Deserialize, Serialize};

use super::{AppExternalId, AppId, CodedError, EnvironmentId};

/// Arguments sent to the remote resync operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResyncRequest {
    #[serde(rename = "appExternalID")]
    pub app_external_id: AppExternalId,
    /// `None` when the user did not override the URL
    #[serde(rename = "appURL")]
    pub app_url: Option<String>,
    #[serde(rename = "envID")]
    pub env_id: EnvironmentId,
}

/// Reference to the app a successful resync touched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRef {
    pub id: AppId,
}

/// Body of the remote resync result
///
/// Exactly one of `app` and `error` is expected. Anything else is treated
/// as a malformed response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResyncResponse {
    #[serde(default)]
    pub app: Option<AppRef>,
    #[serde(default)]
    pub error: Option<CodedError>,
}

impl ResyncResponse {
    pub fn success(app_id: impl Into<String>) -> Self {
        Self {
            app: Some(AppRef {
                id: AppId::new(app_id),
            }),
            error: None,
        }
    }

    pub fn failure(error: CodedError) -> Self {
        Self {
            app: None,
            error: Some(error),
        }
    }

    /// Interpret the body. An error object takes precedence over app data.
    pub fn classify(self) -> ResyncOutcome {
        match (self.error, self.app) {
            (Some(error), _) => ResyncOutcome::ApplicationError(error),
            (None, Some(app)) => ResyncOutcome::Success { app_id: app.id },
            (None, None) => ResyncOutcome::TransportFailure(CodedError::unknown()),
        }
    }
}

/// Result of one resync attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ResyncOutcome {
    /// The server accepted the resync
    Success { app_id: AppId },
    /// The server understood the request and rejected it
    ApplicationError(CodedError),
    /// The call did not complete or returned an unusable body
    TransportFailure(CodedError),
}

impl ResyncOutcome {
    /// Classify the result of a remote call. `Err` is always a transport failure.
    pub fn from_result<E>(result: Result<ResyncResponse, E>) -> Self {
        match result {
            Ok(response) => response.classify(),
            Err(_) => ResyncOutcome::TransportFailure(CodedError::unknown()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResyncOutcome::Success { .. })
    }

    /// The failure to show, if this outcome is one
    pub fn failure(&self) -> Option<&CodedError> {
        match self {
            ResyncOutcome::Success { .. } => None,
            ResyncOutcome::ApplicationError(e) | ResyncOutcome::TransportFailure(e) => Some(e),
        }
    }
}
