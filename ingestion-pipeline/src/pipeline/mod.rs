mod config;
mod context;
mod services;
mod stages;
mod state;

pub use config::{IngestionConfig, IngestionTuning};
#[allow(clippy::module_name_repetitions)]
pub use services::{DefaultPipelineServices, PipelineServices};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use common::{error::AppError, utils::config::AppConfig};
use tracing::info;

use crate::chunking::PageText;

use self::{
    context::PipelineContext,
    stages::{embed_chunks, persist_records, segment_document},
    state::ready,
};

/// Success payload of one ingestion run: the number of chunks stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionOutcome {
    pub chunk_count: usize,
}

#[allow(clippy::module_name_repetitions)]
pub struct IngestionPipeline {
    pipeline_config: IngestionConfig,
    services: Arc<dyn PipelineServices>,
}

impl IngestionPipeline {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_services(
            IngestionConfig::from_app_config(config),
            Arc::new(DefaultPipelineServices::new(config)),
        )
    }

    pub fn with_services(
        pipeline_config: IngestionConfig,
        services: Arc<dyn PipelineServices>,
    ) -> Self {
        Self {
            pipeline_config,
            services,
        }
    }

    /// Runs one document through segment -> embed -> persist.
    ///
    /// Stages execute strictly in order and the first failure aborts the
    /// run; nothing reaches the index before the final stage, so an aborted
    /// run leaves no partial writes behind. The pipeline keeps no state
    /// between runs and may be invoked again with fresh input after either
    /// outcome.
    #[tracing::instrument(skip_all, fields(document = %document_name))]
    pub async fn ingest(
        &self,
        pages: Vec<PageText>,
        document_name: &str,
    ) -> Result<IngestionOutcome, AppError> {
        let mut ctx = PipelineContext::new(
            document_name,
            &self.pipeline_config,
            self.services.as_ref(),
        );

        let machine = ready();

        let pipeline_started = Instant::now();

        let stage_start = Instant::now();
        let machine = segment_document(machine, &mut ctx, pages)
            .await
            .map_err(|err| ctx.abort(err))?;
        let segment_duration = stage_start.elapsed();

        let stage_start = Instant::now();
        let machine = embed_chunks(machine, &mut ctx)
            .await
            .map_err(|err| ctx.abort(err))?;
        let embed_duration = stage_start.elapsed();

        let stage_start = Instant::now();
        let _machine = persist_records(machine, &mut ctx)
            .await
            .map_err(|err| ctx.abort(err))?;
        let persist_duration = stage_start.elapsed();

        let chunk_count = ctx.chunks.len();

        info!(
            document = %document_name,
            chunk_count,
            total_ms = duration_millis(pipeline_started.elapsed()),
            segment_ms = duration_millis(segment_duration),
            embed_ms = duration_millis(embed_duration),
            persist_ms = duration_millis(persist_duration),
            "ingestion pipeline finished"
        );

        Ok(IngestionOutcome { chunk_count })
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
