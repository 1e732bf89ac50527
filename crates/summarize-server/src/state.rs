use std::sync::Arc;

use summarize_core::ProjectMetadata;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub project: Arc<ProjectMetadata>,
}

impl AppState {
    pub fn new(project: ProjectMetadata) -> Self {
        Self {
            project: Arc::new(project),
        }
    }
}
