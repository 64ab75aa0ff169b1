use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{chunk_record::ChunkRecord, search_match::SearchMatch};
use crate::error::AppError;

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [ChunkRecord],
    namespace: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    namespace: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    matches: Vec<SearchMatch>,
}

/// Client for the remote vector index, authenticated per request with an
/// `Api-Key` header.
#[derive(Clone)]
pub struct VectorIndexClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VectorIndexClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Persists a batch of records into the given namespace in a single
    /// call. The batch succeeds or fails as a whole; ids that already exist
    /// are overwritten.
    pub async fn upsert(&self, records: &[ChunkRecord], namespace: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!("{}/vectors/upsert", self.base_url))
            .header("Api-Key", &self.api_key)
            .json(&UpsertRequest {
                vectors: records,
                namespace,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::from_response(response).await);
        }

        debug!(record_count = records.len(), namespace, "records upserted");

        Ok(())
    }

    /// Returns the `top_k` records most similar to `vector`, descending by
    /// score as ranked by the index.
    pub async fn search(
        &self,
        vector: &[f32],
        top_k: usize,
        namespace: &str,
    ) -> Result<Vec<SearchMatch>, AppError> {
        let response = self
            .http
            .post(format!("{}/query", self.base_url))
            .header("Api-Key", &self.api_key)
            .json(&QueryRequest {
                vector,
                top_k,
                include_metadata: true,
                namespace,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::from_response(response).await);
        }

        let payload: QueryResponse = response.json().await?;

        debug!(
            match_count = payload.matches.len(),
            namespace, "similarity search completed"
        );

        Ok(payload.matches)
    }
}
