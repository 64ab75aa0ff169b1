//! Query-side orchestration: embed the query text once, then run a
//! similarity search against the vector index.

use common::{
    error::AppError,
    storage::{index::VectorIndexClient, types::search_match::SearchMatch},
    utils::{config::AppConfig, embedding::EmbeddingClient},
};
use tracing::{info, instrument};

pub struct QueryPipeline {
    embedding: EmbeddingClient,
    index: VectorIndexClient,
    namespace: String,
    default_top_k: usize,
}

impl QueryPipeline {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            embedding: EmbeddingClient::new(
                config.embedding_api_url.as_str(),
                config.embedding_api_token.as_str(),
            ),
            index: VectorIndexClient::new(
                &config.vector_index_url,
                config.vector_index_api_key.as_str(),
            ),
            namespace: config.vector_namespace.clone(),
            default_top_k: config.query_top_k,
        }
    }

    /// Answers a free-text query with the most similar stored passages.
    ///
    /// A blank query fails with [`AppError::EmptyQuery`] before any network
    /// call. Matches come back in the index's descending score order,
    /// untouched; an empty list is a valid outcome, not an error. The single
    /// embedding call needs no pacing delay.
    #[instrument(skip_all)]
    pub async fn query(
        &self,
        text: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<SearchMatch>, AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let top_k = top_k.unwrap_or(self.default_top_k);
        let query_embedding = self.embedding.embed(trimmed).await?;
        let matches = self
            .index
            .search(&query_embedding, top_k, &self.namespace)
            .await?;

        info!(match_count = matches.len(), top_k, "query completed");

        Ok(matches)
    }
}
