use thiserror::Error;

/// Reasons an ingestion can fail. Either way the previously loaded state stays in place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Source contains no data rows")]
    EmptySource,

    #[error("Failed to decode source: {0}")]
    MalformedSource(String),
}

impl IngestError {
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        IngestError::MalformedSource(reason.to_string())
    }
}
