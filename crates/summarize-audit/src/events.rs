use serde::Serialize;
use tracing::info;

use summarize_core::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ValidationFailed,
    WriteFailed,
    RefreshCompleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::WriteFailed => "write_failed",
            Self::RefreshCompleted => "refresh_completed",
        }
    }
}

/// A structured audit entry about one summarize instance.
///
/// Entries are emitted through `tracing` so they land wherever the host
/// collects module logs; `details` carries the action-specific payload
/// (error list, refresh counts).
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    /// Zero-based position of the instance in the module settings.
    pub instance: usize,
    pub instance_name: String,
    pub record: Option<RecordId>,
    pub details: Option<serde_json::Value>,
    pub at: jiff::Timestamp,
}

impl AuditEvent {
    pub fn new(action: AuditAction, instance: usize, instance_name: impl Into<String>) -> Self {
        Self {
            action,
            instance,
            instance_name: instance_name.into(),
            record: None,
            details: None,
            at: jiff::Timestamp::now(),
        }
    }

    pub fn with_record(mut self, record: RecordId) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        info!(
            audit.action = self.action.as_str(),
            audit.instance = self.instance,
            audit.instance_name = %self.instance_name,
            audit.record = self.record.as_ref().map(RecordId::as_str),
            audit.details = %details,
            audit.at = %self.at,
            "audit event"
        );
    }
}
