use std::env;

use eyre::WrapErr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use summarize_core::ProjectMetadata;
use summarize_server::{AppState, app};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bind_addr =
        env::var("SUMMARIZE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let project = match env::var("SUMMARIZE_PROJECT_METADATA") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read project metadata from {path}"))?;
            let project = ProjectMetadata::from_json(&json)
                .wrap_err_with(|| format!("invalid project metadata in {path}"))?;
            tracing::info!(
                path = %path,
                forms = project.forms.len(),
                events = project.events.len(),
                "project metadata loaded"
            );
            project
        }
        Err(_) => {
            tracing::warn!("SUMMARIZE_PROJECT_METADATA not set, validating against an empty project");
            ProjectMetadata::default()
        }
    };

    let listener = TcpListener::bind(&bind_addr)
        .await
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "listening");

    axum::serve(listener, app(AppState::new(project))).await?;
    Ok(())
}
