use summarize_core::{
    EventId, FieldName, FormName, ProjectTopology, RawInstance, RepeatKind, SummarizeConfig,
};
use summarize_engine::{ResolvedFields, Validation, classify, resolve, validate};

use crate::error::ModuleError;

/// One configured summarize instance: its parsed configuration, resolved
/// once, and validated once against the project.
#[derive(Debug, Clone)]
pub struct SummarizeInstance {
    index: usize,
    config: SummarizeConfig,
    resolved: ResolvedFields,
    validation: Validation,
}

impl SummarizeInstance {
    /// `index` is the zero-based position in the module settings.
    pub fn new(index: usize, raw: &RawInstance, topology: &dyn ProjectTopology) -> Self {
        Self::from_config(index, SummarizeConfig::from_raw(raw), topology)
    }

    pub fn from_config(
        index: usize,
        config: SummarizeConfig,
        topology: &dyn ProjectTopology,
    ) -> Self {
        let resolved = resolve(&config, topology);
        let validation = validate(&config, &resolved, topology);

        tracing::debug!(
            instance = index,
            forms = ?config.include_forms,
            valid = validation.is_ok(),
            "summarize instance loaded"
        );

        Self {
            index,
            config,
            resolved,
            validation,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &SummarizeConfig {
        &self.config
    }

    pub fn resolved(&self) -> &ResolvedFields {
        &self.resolved
    }

    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_ok()
    }

    pub fn errors(&self) -> Vec<String> {
        self.validation.messages()
    }

    /// `#2 'Title'` style name used in reports and audit entries.
    pub fn display_name(&self) -> String {
        self.config.display_name(self.index)
    }

    /// The event and field the rendered block is written to.
    pub fn target(&self) -> Result<(&EventId, &FieldName), ModuleError> {
        match (&self.config.event_id, &self.config.destination_field) {
            (Some(event), Some(field)) => Ok((event, field)),
            _ => Err(ModuleError::Incomplete(self.display_name())),
        }
    }

    pub fn destination_form(&self, topology: &dyn ProjectTopology) -> Option<FormName> {
        let field = self.config.destination_field.as_ref()?;
        topology.field(field).map(|meta| meta.form.clone())
    }

    /// Repeat scope of this instance's data, or `None` without an event.
    pub fn repeat_kind(&self, topology: &dyn ProjectTopology) -> Option<RepeatKind> {
        let event = self.config.event_id.as_ref()?;
        Some(classify(event, &self.resolved, topology))
    }
}
