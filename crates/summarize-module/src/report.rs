use serde::Serialize;

use summarize_core::{ProjectTopology, RawInstance};
use summarize_render::Sanitizer;

use crate::instance::SummarizeInstance;

/// Validation outcome across every configured instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigReport {
    pub ok: bool,
    /// One HTML block per invalid instance.
    pub messages: Vec<String>,
}

impl ConfigReport {
    pub fn from_instances(instances: &[SummarizeInstance], sanitizer: &dyn Sanitizer) -> Self {
        let messages: Vec<String> = instances
            .iter()
            .filter(|instance| !instance.is_valid())
            .map(|instance| issue_block(instance, sanitizer))
            .collect();

        Self {
            ok: messages.is_empty(),
            messages,
        }
    }
}

/// Build instances from raw settings and report on all of them.
pub fn validate_configs(
    raws: &[RawInstance],
    topology: &dyn ProjectTopology,
    sanitizer: &dyn Sanitizer,
) -> (Vec<SummarizeInstance>, ConfigReport) {
    let instances: Vec<SummarizeInstance> = raws
        .iter()
        .enumerate()
        .map(|(index, raw)| SummarizeInstance::new(index, raw, topology))
        .collect();
    let report = ConfigReport::from_instances(&instances, sanitizer);
    (instances, report)
}

fn issue_block(instance: &SummarizeInstance, sanitizer: &dyn Sanitizer) -> String {
    let items = instance
        .errors()
        .iter()
        .map(|message| sanitizer.sanitize(message))
        .collect::<Vec<_>>()
        .join("</li><li>");

    format!(
        "<b>Configuration Issues with {}</b><ul><li>{items}</li></ul>",
        sanitizer.sanitize(&instance.display_name())
    )
}
