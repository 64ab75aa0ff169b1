use serde::{Deserialize, Serialize};

/// Metadata persisted alongside each vector and echoed back by searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub text: String,
    pub filename: String,
    pub chunk_index: usize,
}

/// A single record as the vector index stores it. Records are write-once per
/// id; a colliding id overwrites the previous record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: ChunkMetadata,
}

impl ChunkRecord {
    /// Builds the record for one chunk. Ids derive deterministically from the
    /// document name and chunk position, so re-ingesting a document lands on
    /// the same ids and replaces its earlier records.
    pub fn new(
        document_name: &str,
        chunk_index: usize,
        text: impl Into<String>,
        values: Vec<f32>,
    ) -> Self {
        Self {
            id: format!("{document_name}_chunk_{chunk_index}"),
            values,
            metadata: ChunkMetadata {
                text: text.into(),
                filename: document_name.to_string(),
                chunk_index,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_derives_from_name_and_position() {
        let record = ChunkRecord::new("report.pdf", 3, "a passage", vec![0.5, 0.25]);

        assert_eq!(record.id, "report.pdf_chunk_3");
        assert_eq!(record.metadata.filename, "report.pdf");
        assert_eq!(record.metadata.chunk_index, 3);
        assert_eq!(record.metadata.text, "a passage");
    }
}
