use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    pub embedding_api_url: String,
    pub embedding_api_token: String,
    pub vector_index_url: String,
    pub vector_index_api_key: String,
    #[serde(default = "default_vector_namespace")]
    pub vector_namespace: String,
    #[serde(default = "default_chunk_target_size")]
    pub chunk_target_size: usize,
    #[serde(default = "default_embedding_delay_ms")]
    pub embedding_delay_ms: u64,
    #[serde(default = "default_query_top_k")]
    pub query_top_k: usize,
}

fn default_vector_namespace() -> String {
    "pdf-documents".to_string()
}

fn default_chunk_target_size() -> usize {
    500
}

fn default_embedding_delay_ms() -> u64 {
    1000
}

fn default_query_top_k() -> usize {
    5
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}
