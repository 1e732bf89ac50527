use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use summarize_core::{FieldName, FormName, ProjectTopology, SummarizeConfig};

/// The fields a configuration summarizes, with their labels, and the forms
/// those fields (plus the destination field) live on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedFields {
    pub fields: IndexMap<FieldName, String>,
    pub forms: IndexSet<FormName>,
}

impl ResolvedFields {
    pub fn field_names(&self) -> Vec<FieldName> {
        self.fields.keys().cloned().collect()
    }

    pub fn contains_form(&self, form: &FormName) -> bool {
        self.forms.contains(form)
    }
}

/// Resolve `config` against the project.
///
/// Whole forms first, then individually included fields (overwriting in
/// place), then exclusions. The destination field's form always joins the
/// form set; the destination field itself never stays in the field map.
/// Every included form joins the form set even when the project lacks it;
/// unknown fields are skipped. Both are reported by
/// [`validate`](crate::validate::validate).
pub fn resolve(config: &SummarizeConfig, topology: &dyn ProjectTopology) -> ResolvedFields {
    let mut resolved = ResolvedFields::default();

    for form in &config.include_forms {
        resolved.forms.insert(form.clone());
        let Some(form_fields) = topology.form_fields(form) else {
            continue;
        };
        let status_field = form.status_field();
        for field in form_fields {
            if config.remove_form_status && *field == status_field {
                continue;
            }
            let label = topology
                .field(field)
                .map(|meta| meta.label.clone())
                .unwrap_or_default();
            resolved.fields.insert(field.clone(), label);
        }
    }

    for field in &config.include_fields {
        if let Some(meta) = topology.field(field) {
            resolved.fields.insert(field.clone(), meta.label.clone());
            resolved.forms.insert(meta.form.clone());
        }
    }

    for field in &config.exclude_fields {
        resolved.fields.shift_remove(field);
    }

    if let Some(destination) = &config.destination_field {
        if let Some(meta) = topology.field(destination) {
            resolved.forms.insert(meta.form.clone());
        }
        resolved.fields.shift_remove(destination);
    }

    tracing::debug!(
        fields = resolved.fields.len(),
        forms = resolved.forms.len(),
        "resolved summarize fields"
    );

    resolved
}
