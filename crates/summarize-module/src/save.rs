use serde::Serialize;

use summarize_core::{DataSlot, EventId, FormName, RecordId};

/// A record save reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEvent {
    pub record: RecordId,
    pub event_id: EventId,
    /// Form that was saved, when the host knows it.
    pub instrument: Option<FormName>,
    pub repeat_instance: Option<u32>,
    /// Set while the host deletes a repeating instance of this form.
    pub deleted_instance_of: Option<FormName>,
}

impl SaveEvent {
    pub fn new(record: impl Into<RecordId>, event_id: impl Into<EventId>) -> Self {
        Self {
            record: record.into(),
            event_id: event_id.into(),
            instrument: None,
            repeat_instance: None,
            deleted_instance_of: None,
        }
    }

    pub fn with_instrument(mut self, form: impl Into<FormName>) -> Self {
        self.instrument = Some(form.into());
        self
    }

    pub fn with_instance(mut self, instance: u32) -> Self {
        self.repeat_instance = Some(instance);
        self
    }

    pub fn deleting_instance_of(mut self, form: impl Into<FormName>) -> Self {
        self.deleted_instance_of = Some(form.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EventMismatch,
    InstrumentOutOfScope,
    InstanceDeleted,
}

/// What happened to one instance on a record save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Skipped { reason: SkipReason },
    Invalid { messages: Vec<String> },
    Written { slot: DataSlot },
    Failed { error: String },
}
