//! GraphQL resync client
//!
//! Uses synchronous HTTP (ureq) so the blocking call can run on whatever
//! executor the host prefers. The [`ResyncClient`] impl moves it onto
//! tokio's blocking pool.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;

use super::api::{GraphqlRequest, GraphqlResponse};
use super::{ClientError, ResyncClient};
use crate::config::ApiConfig;
use crate::models::{ResyncRequest, ResyncResponse};

/// The `resyncApp` mutation
pub const RESYNC_APP_MUTATION: &str = "mutation ResyncApp($appExternalID: String!, $appURL: String, $envID: UUID!) {
  resyncApp(appExternalID: $appExternalID, appURL: $appURL, envID: $envID) {
    app {
      id
    }
    error {
      code
      data
      message
    }
  }
}";

/// Client for the `resyncApp` GraphQL mutation
#[derive(Clone)]
pub struct GraphqlResyncClient {
    config: ApiConfig,
    agent: ureq::Agent,
}

impl GraphqlResyncClient {
    pub fn new(config: ApiConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();
        Self {
            config,
            agent: ureq::Agent::new_with_config(agent_config),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send the mutation and block until the response is parsed
    pub fn resync_blocking(&self, request: &ResyncRequest) -> Result<ResyncResponse, ClientError> {
        debug!(
            "POST {} resyncApp for {}",
            self.config.endpoint, request.app_external_id
        );

        let body = GraphqlRequest {
            query: RESYNC_APP_MUTATION,
            variables: request,
        };

        let mut builder = self.agent.post(self.config.endpoint.as_str());
        if let Some(token) = &self.config.token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let mut response = builder.send_json(&body)?;
        let envelope: GraphqlResponse = response.body_mut().read_json()?;
        unwrap_envelope(envelope)
    }
}

/// Pull the resync result out of a GraphQL envelope
fn unwrap_envelope(envelope: GraphqlResponse) -> Result<ResyncResponse, ClientError> {
    let result = envelope.data.and_then(|d| d.resync_app);
    match (result, envelope.errors) {
        (Some(result), errors) => {
            if let Some(errors) = errors.filter(|e| !e.is_empty()) {
                warn!("resyncApp returned data alongside {} GraphQL errors", errors.len());
            }
            Ok(result)
        }
        (None, Some(errors)) if !errors.is_empty() => Err(ClientError::GraphQl {
            messages: errors.into_iter().map(|e| e.message).collect(),
        }),
        (None, _) => Err(ClientError::MissingData),
    }
}

#[async_trait]
impl ResyncClient for GraphqlResyncClient {
    async fn resync_app(&self, request: &ResyncRequest) -> Result<ResyncResponse> {
        let client = self.clone();
        let request = request.clone();
        let response = tokio::task::spawn_blocking(move || client.resync_blocking(&request))
            .await
            .map_err(ClientError::from)
            .context("Failed to run resync request")?
            .context("Failed to resync app")?;
        Ok(response)
    }
}
