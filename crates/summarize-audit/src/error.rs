use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit sink error: {0}")]
    Sink(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
