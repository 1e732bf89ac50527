use serde::Serialize;
use thiserror::Error;

use summarize_core::{ElementType, FieldName, FormName, ProjectTopology, RepeatScope, SummarizeConfig};

use crate::resolve::ResolvedFields;

/// One way a configuration disagrees with the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ConfigIssue {
    #[error("An event must be selected")]
    MissingEvent,

    #[error("Form {form} is not found in project")]
    UnknownForm { form: FormName },

    #[error("Field {field} is not found in project")]
    UnknownField { field: FieldName },

    #[error("Excluded field {field} is not found in project")]
    UnknownExcludedField { field: FieldName },

    #[error("A destination field must be selected")]
    MissingDestination,

    #[error("Destination field {field} is not found in project")]
    UnknownDestination { field: FieldName },

    #[error("Destination field {field} is of type {element_type}, not text or textarea")]
    DestinationNotText {
        field: FieldName,
        element_type: ElementType,
    },

    #[error("Form {form} is not found/enabled in {event_name}")]
    FormNotInEvent { form: FormName, event_name: String },

    #[error(
        "If a form is repeating in an event, only fields from that single form can be summarized (found: {})",
        forms_list(.forms)
    )]
    RepeatingFormMixed { forms: Vec<FormName> },
}

fn forms_list(forms: &[FormName]) -> String {
    forms
        .iter()
        .map(FormName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every issue found in one configuration, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub issues: Vec<ConfigIssue>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Check a configuration and its resolution against the project.
///
/// All rules run; nothing short-circuits.
pub fn validate(
    config: &SummarizeConfig,
    resolved: &ResolvedFields,
    topology: &dyn ProjectTopology,
) -> Validation {
    let mut issues = Vec::new();

    if config.event_id.is_none() {
        issues.push(ConfigIssue::MissingEvent);
    }

    for form in &config.include_forms {
        if !topology.form_exists(form) {
            issues.push(ConfigIssue::UnknownForm { form: form.clone() });
        }
    }

    for field in &config.include_fields {
        if topology.field(field).is_none() {
            issues.push(ConfigIssue::UnknownField {
                field: field.clone(),
            });
        }
    }

    for field in &config.exclude_fields {
        if topology.field(field).is_none() {
            issues.push(ConfigIssue::UnknownExcludedField {
                field: field.clone(),
            });
        }
    }

    match &config.destination_field {
        None => issues.push(ConfigIssue::MissingDestination),
        Some(field) => match topology.field(field) {
            None => issues.push(ConfigIssue::UnknownDestination {
                field: field.clone(),
            }),
            Some(meta) if !meta.element_type.is_free_text() => {
                issues.push(ConfigIssue::DestinationNotText {
                    field: field.clone(),
                    element_type: meta.element_type.clone(),
                });
            }
            Some(_) => {}
        },
    }

    if let Some(event) = &config.event_id {
        let enabled = topology.event_forms(event).unwrap_or_default();
        let event_name = topology.event_name(event).unwrap_or(event.as_str());
        for form in &resolved.forms {
            if !enabled.contains(form) {
                issues.push(ConfigIssue::FormNotInEvent {
                    form: form.clone(),
                    event_name: event_name.to_string(),
                });
            }
        }

        if let RepeatScope::Forms { forms: repeating } = topology.repeat_scope(event)
            && resolved.forms.len() > 1
            && resolved.forms.iter().any(|form| repeating.contains(form))
        {
            issues.push(ConfigIssue::RepeatingFormMixed {
                forms: resolved.forms.iter().cloned().collect(),
            });
        }
    }

    Validation { issues }
}
