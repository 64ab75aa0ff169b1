use common::utils::config::AppConfig;

#[derive(Debug, Clone)]
pub struct IngestionTuning {
    pub chunk_target_size: usize,
    pub embedding_delay_ms: u64,
}

impl Default for IngestionTuning {
    fn default() -> Self {
        Self {
            chunk_target_size: 500,
            embedding_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestionConfig {
    pub tuning: IngestionTuning,
}

impl IngestionConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            tuning: IngestionTuning {
                chunk_target_size: config.chunk_target_size,
                embedding_delay_ms: config.embedding_delay_ms,
            },
        }
    }
}
