use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record data read error: {0}")]
    Read(String),

    #[error("record data write error: {0}")]
    Write(String),

    #[error("settings error: {0}")]
    Settings(String),
}
