use serde::{Deserialize, Serialize};

use super::chunk_record::ChunkMetadata;

/// One search hit: a similarity score in `[0, 1]` plus the stored metadata.
/// Ranking is established by the index and never recomputed locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    pub score: f32,
    pub metadata: ChunkMetadata,
}
