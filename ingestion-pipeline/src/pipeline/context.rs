use common::error::AppError;
use tracing::error;

use crate::chunking::Chunk;

use super::{config::IngestionConfig, services::PipelineServices};

pub struct PipelineContext<'a> {
    pub document_name: &'a str,
    pub pipeline_config: &'a IngestionConfig,
    pub services: &'a dyn PipelineServices,
    pub chunks: Vec<Chunk>,
    pub embeddings: Vec<Vec<f32>>,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        document_name: &'a str,
        pipeline_config: &'a IngestionConfig,
        services: &'a dyn PipelineServices,
    ) -> Self {
        Self {
            document_name,
            pipeline_config,
            services,
            chunks: Vec::new(),
            embeddings: Vec::new(),
        }
    }

    pub fn abort(&self, err: AppError) -> AppError {
        error!(
            document = %self.document_name,
            error = %err,
            "ingestion pipeline aborted"
        );
        err
    }
}
