use thiserror::Error;
use tokio::task::JoinError;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Empty document: {0}")]
    EmptyDocument(String),
    #[error("Empty query")]
    EmptyQuery,
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
    #[error("Remote service error: {status} {status_text} - {body}")]
    RemoteService {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Document parsing error: {0}")]
    Parsing(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    Join(#[from] JoinError),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Consumes a non-success response into a `RemoteService` error carrying
    /// the status line and whatever body text the service returned.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_string());

        Self::RemoteService {
            status: status.as_u16(),
            status_text,
            body,
        }
    }
}
