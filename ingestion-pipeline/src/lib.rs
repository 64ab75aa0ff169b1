#![allow(clippy::missing_docs_in_private_items)]

pub mod chunking;
pub mod pipeline;
pub mod utils;

pub use pipeline::{IngestionConfig, IngestionOutcome, IngestionPipeline, IngestionTuning};
