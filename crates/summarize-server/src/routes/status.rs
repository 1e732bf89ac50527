use axum::Json;
use axum::extract::State;
use serde_json::Value;

use summarize_module::status::GET_STATUS;
use summarize_module::{ConfigStatus, StatusRequest, config_status};
use summarize_render::HtmlEscape;

use crate::error::ApiError;
use crate::state::AppState;

/// Validate the unsaved settings posted by the configuration dialog.
pub async fn check_config(
    State(state): State<AppState>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<ConfigStatus>, ApiError> {
    if request.action != GET_STATUS {
        return Err(ApiError::BadRequest(format!(
            "unknown action: {}",
            request.action
        )));
    }

    let Value::Object(raw) = &request.raw else {
        return Err(ApiError::BadRequest(
            "raw settings must be a JSON object".to_string(),
        ));
    };

    let status = config_status(raw, state.project.as_ref(), &HtmlEscape)?;
    Ok(Json(status))
}
