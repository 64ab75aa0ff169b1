use async_trait::async_trait;
use common::{
    error::AppError,
    storage::{index::VectorIndexClient, types::chunk_record::ChunkRecord},
    utils::{config::AppConfig, embedding::EmbeddingClient},
};

/// Remote collaborators the pipeline stages call out to. Split out as a
/// trait so tests can substitute the network.
#[async_trait]
pub trait PipelineServices: Send + Sync {
    async fn embed_chunk(&self, text: &str) -> Result<Vec<f32>, AppError>;

    async fn store_records(&self, records: Vec<ChunkRecord>) -> Result<(), AppError>;
}

pub struct DefaultPipelineServices {
    embedding: EmbeddingClient,
    index: VectorIndexClient,
    namespace: String,
}

impl DefaultPipelineServices {
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
        }
    }
}

#[async_trait]
impl PipelineServices for DefaultPipelineServices {
    async fn embed_chunk(&self, text: &str) -> Result<Vec<f32>, AppError> {
        self.embedding.embed(text).await
    }

    async fn store_records(&self, records: Vec<ChunkRecord>) -> Result<(), AppError> {
        self.index.upsert(&records, &self.namespace).await
    }
}
