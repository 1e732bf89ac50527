use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{EventId, FormName};

/// How a configuration's data is scoped, computed once from the topology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "form", rename_all = "snake_case")]
pub enum RepeatKind {
    /// Plain event-scoped fields.
    NoRepeat,
    /// Fields on a single repeating form; instances belong to that form.
    ByForm(FormName),
    /// Fields under a repeating event; instances are unnamed.
    ByEvent,
}

impl RepeatKind {
    pub fn is_repeating(&self) -> bool {
        !matches!(self, Self::NoRepeat)
    }
}

/// Storage address of one set of field values for a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum DataSlot {
    Event {
        event: EventId,
    },
    FormInstance {
        event: EventId,
        form: FormName,
        instance: u32,
    },
    EventInstance {
        event: EventId,
        instance: u32,
    },
}

/// The host numbers repeating instances from 1.
pub const FIRST_INSTANCE: u32 = 1;

impl DataSlot {
    /// Address for `kind` in `event`. Repeating kinds without an instance
    /// number address the first instance.
    pub fn for_repeat(event: &EventId, kind: &RepeatKind, instance: Option<u32>) -> Self {
        let instance = instance.unwrap_or(FIRST_INSTANCE);
        match kind {
            RepeatKind::NoRepeat => Self::Event {
                event: event.clone(),
            },
            RepeatKind::ByForm(form) => Self::FormInstance {
                event: event.clone(),
                form: form.clone(),
                instance,
            },
            RepeatKind::ByEvent => Self::EventInstance {
                event: event.clone(),
                instance,
            },
        }
    }

    pub fn event(&self) -> &EventId {
        match self {
            Self::Event { event }
            | Self::FormInstance { event, .. }
            | Self::EventInstance { event, .. } => event,
        }
    }
}

impl fmt::Display for DataSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event { event } => write!(f, "event {event}"),
            Self::FormInstance {
                event,
                form,
                instance,
            } => write!(f, "event {event} / {form} #{instance}"),
            Self::EventInstance { event, instance } => write!(f, "event {event} #{instance}"),
        }
    }
}
