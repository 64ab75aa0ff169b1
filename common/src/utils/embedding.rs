use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    inputs: &'a str,
}

/// Client for the remote embedding service.
///
/// One network call per invocation, no retry. Pacing between successive
/// calls is the caller's concern, not this client's.
#[derive(Clone)]
pub struct EmbeddingClient {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl EmbeddingClient {
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_token: api_token.into(),
        }
    }

    /// Generates an embedding vector for the given input text.
    ///
    /// The service wraps its result in a nested numeric array; the first
    /// inner array is the embedding. Non-success responses surface as
    /// [`AppError::RemoteService`] with the status line and body, any other
    /// body shape as [`AppError::UnexpectedResponse`].
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&EmbeddingRequest { inputs: input })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::from_response(response).await);
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)
            .map_err(|_| AppError::UnexpectedResponse(body.clone()))?;

        let embedding = parse_embedding(&payload)
            .ok_or_else(|| AppError::UnexpectedResponse(payload.to_string()))?;

        debug!(dimensions = embedding.len(), "embedding generated");

        Ok(embedding)
    }
}

fn parse_embedding(payload: &Value) -> Option<Vec<f32>> {
    let rows = payload.as_array()?;
    let first = rows.first()?.as_array()?;

    first
        .iter()
        .map(|value| value.as_f64().map(|number| number as f32))
        .collect()
}
