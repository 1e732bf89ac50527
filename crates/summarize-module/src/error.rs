use thiserror::Error;

use summarize_core::{CoreError, RecordId};
use summarize_render::RenderError;
use summarize_store::StoreError;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("settings error: {0}")]
    Settings(#[from] CoreError),

    #[error("write for record {record} rejected: {}", .errors.join("; "))]
    WriteRejected {
        record: RecordId,
        errors: Vec<String>,
    },

    #[error("summarize instance {0} has no event or destination field")]
    Incomplete(String),
}
