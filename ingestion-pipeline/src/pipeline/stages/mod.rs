use common::{error::AppError, storage::types::chunk_record::ChunkRecord};
use state_machines::core::GuardError;
use tokio::time::{sleep, Duration};
use tracing::{debug, instrument};

use crate::chunking::{self, PageText};

use super::{
    context::PipelineContext,
    state::{Embedded, IngestionMachine, Persisted, Ready, Segmented},
};

#[instrument(level = "trace", skip_all, fields(document = %ctx.document_name))]
pub async fn segment_document(
    machine: IngestionMachine<(), Ready>,
    ctx: &mut PipelineContext<'_>,
    pages: Vec<PageText>,
) -> Result<IngestionMachine<(), Segmented>, AppError> {
    let chunks = chunking::segment_pages(&pages, ctx.pipeline_config.tuning.chunk_target_size);

    if chunks.is_empty() {
        return Err(AppError::EmptyDocument(format!(
            "no extractable text in {}",
            ctx.document_name
        )));
    }

    tracing::info!(
        document = %ctx.document_name,
        page_count = pages.len(),
        chunk_count = chunks.len(),
        "document segmented"
    );

    ctx.chunks = chunks;

    machine
        .segment()
        .map_err(|(_, guard)| map_guard_error("segment", &guard))
}

#[instrument(level = "trace", skip_all, fields(document = %ctx.document_name))]
pub async fn embed_chunks(
    machine: IngestionMachine<(), Segmented>,
    ctx: &mut PipelineContext<'_>,
) -> Result<IngestionMachine<(), Embedded>, AppError> {
    let total = ctx.chunks.len();
    let delay = Duration::from_millis(ctx.pipeline_config.tuning.embedding_delay_ms);

    for (index, chunk) in ctx.chunks.iter().enumerate() {
        let embedding = ctx.services.embed_chunk(&chunk.text).await?;

        debug!(
            document = %ctx.document_name,
            chunk_index = index,
            total,
            dimensions = embedding.len(),
            "chunk embedded"
        );

        ctx.embeddings.push(embedding);

        // Pacing keeps successive calls under the embedding service's rate
        // limit; the final call needs no trailing delay.
        if index + 1 < total && !delay.is_zero() {
            sleep(delay).await;
        }
    }

    machine
        .embed()
        .map_err(|(_, guard)| map_guard_error("embed", &guard))
}

#[instrument(level = "trace", skip_all, fields(document = %ctx.document_name))]
pub async fn persist_records(
    machine: IngestionMachine<(), Embedded>,
    ctx: &mut PipelineContext<'_>,
) -> Result<IngestionMachine<(), Persisted>, AppError> {
    let records: Vec<ChunkRecord> = ctx
        .chunks
        .iter()
        .zip(ctx.embeddings.iter())
        .enumerate()
        .map(|(index, (chunk, embedding))| {
            ChunkRecord::new(
                ctx.document_name,
                index,
                chunk.text.clone(),
                embedding.clone(),
            )
        })
        .collect();

    let record_count = records.len();
    ctx.services.store_records(records).await?;

    debug!(
        document = %ctx.document_name,
        record_count,
        "records flushed to vector index"
    );

    machine
        .persist()
        .map_err(|(_, guard)| map_guard_error("persist", &guard))
}

fn map_guard_error(event: &str, guard: &GuardError) -> AppError {
    AppError::InternalError(format!(
        "invalid ingestion pipeline transition during {event}: {guard:?}"
    ))
}
