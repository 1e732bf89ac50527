use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;

use summarize_audit::{AuditAction, AuditEvent, AuditLog};
use summarize_core::{DataSlot, ProjectTopology, RecordId, RepeatKind};
use summarize_engine::summary_rows;
use summarize_render::{BlockRenderer, Sanitizer};
use summarize_store::{RecordStore, SettingsStore};

use crate::error::ModuleError;
use crate::instance::SummarizeInstance;
use crate::report::{ConfigReport, validate_configs};
use crate::save::{SaveEvent, SaveOutcome, SkipReason};

/// Counts from one bulk refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub instance: usize,
    pub records: usize,
    pub written: usize,
    pub failed: usize,
}

impl RefreshSummary {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Result of handling a configuration save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSaveSummary {
    pub report: ConfigReport,
    pub refreshes: Vec<RefreshSummary>,
}

/// Re-renders summarize destination fields.
///
/// Every collaborator is borrowed for the duration of one host request.
pub struct Summarizer<'a> {
    topology: &'a dyn ProjectTopology,
    records: &'a dyn RecordStore,
    settings: &'a dyn SettingsStore,
    audit: &'a dyn AuditLog,
    sanitizer: &'a dyn Sanitizer,
    renderer: BlockRenderer,
}

impl<'a> Summarizer<'a> {
    pub fn new(
        topology: &'a dyn ProjectTopology,
        records: &'a dyn RecordStore,
        settings: &'a dyn SettingsStore,
        audit: &'a dyn AuditLog,
        sanitizer: &'a dyn Sanitizer,
    ) -> Result<Self, ModuleError> {
        Ok(Self {
            topology,
            records,
            settings,
            audit,
            sanitizer,
            renderer: BlockRenderer::new()?,
        })
    }

    /// Build every configured instance from the settings store.
    pub fn instances(&self) -> Result<Vec<SummarizeInstance>, ModuleError> {
        let raws = self.settings.load_instances()?;
        Ok(raws
            .iter()
            .enumerate()
            .map(|(index, raw)| SummarizeInstance::new(index, raw, self.topology))
            .collect())
    }

    /// Handle a save of the module configuration.
    ///
    /// Every instance is validated and failures are audited. Valid instances
    /// with the refresh flag set re-render every existing record; the flag is
    /// cleared only when the whole refresh succeeded.
    pub fn on_config_save(&self) -> Result<ConfigSaveSummary, ModuleError> {
        let raws = self.settings.load_instances()?;
        let (instances, report) = validate_configs(&raws, self.topology, self.sanitizer);

        for instance in instances.iter().filter(|i| !i.is_valid()) {
            self.audit_invalid(instance);
        }

        let mut refreshes = Vec::new();
        for instance in instances
            .iter()
            .filter(|i| i.is_valid() && i.config().refresh)
        {
            match self.refresh(instance) {
                Ok(summary) => {
                    if summary.is_complete() {
                        if let Err(e) = self.settings.clear_refresh(instance.index()) {
                            tracing::warn!(
                                instance = %instance.display_name(),
                                error = %e,
                                "failed to clear refresh flag"
                            );
                        }
                    } else {
                        tracing::warn!(
                            instance = %instance.display_name(),
                            failed = summary.failed,
                            "bulk refresh incomplete, refresh flag kept"
                        );
                    }
                    refreshes.push(summary);
                }
                Err(e) => {
                    tracing::warn!(
                        instance = %instance.display_name(),
                        error = %e,
                        "bulk refresh failed"
                    );
                }
            }
        }

        tracing::info!(ok = report.ok, refreshes = refreshes.len(), "configuration saved");
        Ok(ConfigSaveSummary { report, refreshes })
    }

    /// Handle a record save. One outcome per configured instance, in
    /// configuration order.
    pub fn on_record_save(&self, event: &SaveEvent) -> Result<Vec<SaveOutcome>, ModuleError> {
        let instances = self.instances()?;
        Ok(instances
            .iter()
            .map(|instance| self.save_instance(instance, event))
            .collect())
    }

    fn save_instance(&self, instance: &SummarizeInstance, event: &SaveEvent) -> SaveOutcome {
        if let Some(reason) = self.skip_reason(instance, event) {
            tracing::debug!(instance = %instance.display_name(), ?reason, "skipping summarize instance");
            return SaveOutcome::Skipped { reason };
        }

        if !instance.is_valid() {
            self.audit_invalid(instance);
            return SaveOutcome::Invalid {
                messages: instance.errors(),
            };
        }

        let kind = classify_or_plain(instance, self.topology);
        let slot = DataSlot::for_repeat(&event.event_id, &kind, event.repeat_instance);

        match self.write_summary(instance, &event.record, &slot) {
            Ok(()) => SaveOutcome::Written { slot },
            Err(e) => {
                self.audit_write_failure(instance, &event.record, &e);
                SaveOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn skip_reason(&self, instance: &SummarizeInstance, event: &SaveEvent) -> Option<SkipReason> {
        if instance.config().event_id.as_ref() != Some(&event.event_id) {
            return Some(SkipReason::EventMismatch);
        }

        if let Some(instrument) = &event.instrument
            && !instance.resolved().contains_form(instrument)
        {
            return Some(SkipReason::InstrumentOutOfScope);
        }

        if let Some(deleted) = &event.deleted_instance_of
            && instance.destination_form(self.topology).as_ref() == Some(deleted)
        {
            return Some(SkipReason::InstanceDeleted);
        }

        None
    }

    /// Re-render every existing record (and every repeating instance) of a
    /// valid instance.
    pub fn refresh(&self, instance: &SummarizeInstance) -> Result<RefreshSummary, ModuleError> {
        let (event, _) = instance.target()?;
        let kind = classify_or_plain(instance, self.topology);
        let records = self.records.record_ids(event)?;

        let mut summary = RefreshSummary {
            instance: instance.index(),
            records: records.len(),
            ..RefreshSummary::default()
        };

        for record in &records {
            let slots: Vec<DataSlot> = if kind.is_repeating() {
                self.records
                    .instances(record, event, &kind)?
                    .into_iter()
                    .map(|n| DataSlot::for_repeat(event, &kind, Some(n)))
                    .collect()
            } else {
                vec![DataSlot::for_repeat(event, &kind, None)]
            };

            for slot in &slots {
                match self.write_summary(instance, record, slot) {
                    Ok(()) => summary.written += 1,
                    Err(e) => {
                        self.audit_write_failure(instance, record, &e);
                        summary.failed += 1;
                    }
                }
            }
        }

        if summary.is_complete() {
            self.record_audit(
                AuditEvent::new(
                    AuditAction::RefreshCompleted,
                    instance.index(),
                    instance.display_name(),
                )
                .with_details(json!({
                    "records": summary.records,
                    "written": summary.written,
                })),
            );
        }

        Ok(summary)
    }

    /// Render the block for one record slot without writing it.
    pub fn render_summary(
        &self,
        instance: &SummarizeInstance,
        record: &RecordId,
        slot: &DataSlot,
    ) -> Result<String, ModuleError> {
        let resolved = instance.resolved();
        let values = self
            .records
            .read(record, &resolved.field_names(), slot)?;
        let rows = summary_rows(
            resolved,
            &values,
            self.topology,
            instance.config().layout.display_blanks,
        );

        Ok(self.renderer.render(
            &rows,
            instance.config().title.as_deref(),
            &instance.config().layout,
            self.sanitizer,
        )?)
    }

    fn write_summary(
        &self,
        instance: &SummarizeInstance,
        record: &RecordId,
        slot: &DataSlot,
    ) -> Result<(), ModuleError> {
        let (_, destination) = instance.target()?;
        let html = self.render_summary(instance, record, slot)?;

        let mut values = IndexMap::new();
        values.insert(destination.clone(), html);

        let report = self.records.write(record, slot, &values)?;
        if !report.is_ok() {
            return Err(ModuleError::WriteRejected {
                record: record.clone(),
                errors: report.errors,
            });
        }

        tracing::info!(
            instance = %instance.display_name(),
            record = %record,
            slot = %slot,
            field = %destination,
            "summary written"
        );
        Ok(())
    }

    fn audit_invalid(&self, instance: &SummarizeInstance) {
        tracing::warn!(
            instance = %instance.display_name(),
            errors = ?instance.errors(),
            "summarize configuration invalid"
        );
        self.record_audit(
            AuditEvent::new(
                AuditAction::ValidationFailed,
                instance.index(),
                instance.display_name(),
            )
            .with_details(json!({ "errors": instance.errors() })),
        );
    }

    fn audit_write_failure(&self, instance: &SummarizeInstance, record: &RecordId, error: &ModuleError) {
        tracing::warn!(
            instance = %instance.display_name(),
            record = %record,
            error = %error,
            "failed to write summary"
        );
        self.record_audit(
            AuditEvent::new(AuditAction::WriteFailed, instance.index(), instance.display_name())
                .with_record(record.clone())
                .with_details(json!({ "error": error.to_string() })),
        );
    }

    fn record_audit(&self, event: AuditEvent) {
        if let Err(e) = self.audit.record(&event) {
            tracing::warn!(error = %e, "failed to record audit event");
        }
    }
}

fn classify_or_plain(instance: &SummarizeInstance, topology: &dyn ProjectTopology) -> RepeatKind {
    instance.repeat_kind(topology).unwrap_or(RepeatKind::NoRepeat)
}
