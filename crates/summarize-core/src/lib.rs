//! summarize-core
//!
//! Shared vocabulary of the Summarize module: identifiers, the parsed
//! configuration model, host settings shapes, project topology, and record
//! value shapes. No I/O: every external collaborator is a trait here or in
//! `summarize-store`.

pub mod config;
pub mod error;
pub mod ids;
pub mod record;
pub mod repeat;
pub mod settings;
pub mod topology;

pub use crate::config::{LayoutOptions, SummarizeConfig};
pub use crate::error::CoreError;
pub use crate::ids::{EventId, FieldName, FormName, RecordId};
pub use crate::record::{RawValue, RecordValues};
pub use crate::repeat::{DataSlot, RepeatKind};
pub use crate::settings::RawInstance;
pub use crate::topology::{ElementType, EventMeta, FieldMeta, ProjectMetadata, ProjectTopology, RepeatScope};
