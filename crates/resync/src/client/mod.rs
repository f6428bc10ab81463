//! Remote resync operation
//!
//! This module provides:
//! - The [`ResyncClient`] trait the controller calls
//! - A GraphQL-over-HTTP implementation
//! - Wire types for the GraphQL envelope

mod graphql;

pub use graphql::{GraphqlResyncClient, RESYNC_APP_MUTATION};

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ResyncRequest, ResyncResponse};

/// Transport-level failures of the remote call
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("GraphQL request failed: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("Response contained no resync result")]
    MissingData,

    #[error("Resync task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Trait for the remote resync operation
///
/// `Err` means the call did not complete or its body was unusable. A
/// server-side rejection is a successful call whose response carries an
/// error object.
#[async_trait]
pub trait ResyncClient: Send + Sync {
    async fn resync_app(&self, request: &ResyncRequest) -> Result<ResyncResponse>;
}

/// GraphQL wire types
pub mod api {
    use serde::{Deserialize, Serialize};

    use crate::models::{ResyncRequest, ResyncResponse};

    /// Request body
    #[derive(Debug, Serialize)]
    pub struct GraphqlRequest<'a> {
        pub query: &'a str,
        pub variables: &'a ResyncRequest,
    }

    /// Response envelope
    #[derive(Debug, Deserialize)]
    pub struct GraphqlResponse {
        pub data: Option<ResyncData>,
        #[serde(default)]
        pub errors: Option<Vec<GraphqlError>>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResyncData {
        pub resync_app: Option<ResyncResponse>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GraphqlError {
        pub message: String,
    }
}
