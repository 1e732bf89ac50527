use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use summarize_core::ProjectTopology;
use summarize_core::settings::transpose_sub_settings;
use summarize_render::Sanitizer;

use crate::error::ModuleError;
use crate::report::validate_configs;

/// The only action the config UI posts.
pub const GET_STATUS: &str = "getStatus";

/// Request body posted by the configuration dialog on every edit.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusRequest {
    pub action: String,
    /// Unsaved settings: the dialog's input snapshot (`event_id____0`) or
    /// one array of values per sub-setting key.
    #[serde(default)]
    pub raw: Value,
}

/// Live validation feedback for the configuration dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfigStatus {
    pub result: bool,
    pub message: Vec<String>,
    /// Client-side function to call after showing the message.
    pub callback: Option<String>,
    /// Milliseconds to wait before the callback.
    pub delay: Option<u64>,
}

/// Validate unsaved settings exactly as a configuration save would.
pub fn config_status(
    raw: &Map<String, Value>,
    topology: &dyn ProjectTopology,
    sanitizer: &dyn Sanitizer,
) -> Result<ConfigStatus, ModuleError> {
    let raws = transpose_sub_settings(raw)?;
    let (_, report) = validate_configs(&raws, topology, sanitizer);

    tracing::debug!(instances = raws.len(), ok = report.ok, "config status checked");

    Ok(ConfigStatus {
        result: report.ok,
        message: report.messages,
        callback: None,
        delay: None,
    })
}
