use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Posts GraphQL documents to a single endpoint over HTTP.
#[derive(Clone)]
pub struct GraphQlTransport {
    http: Client,
    endpoint: String,
}

impl GraphQlTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs one operation and decodes its `data` object.
    ///
    /// Any entry in `errors` fails the call, even when partial data came back.
    pub async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, ClientError> {
        debug!("POST {}", self.endpoint);

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let body: GraphQlResponse<T> = resp.json().await?;
        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(ClientError::GraphQl(messages.join("; ")));
        }

        body.data.ok_or(ClientError::EmptyResponse)
    }
}
