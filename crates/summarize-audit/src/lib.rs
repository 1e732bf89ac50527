//! summarize-audit
//!
//! Structured audit entries for configuration problems and bulk refreshes.

pub mod error;
pub mod events;
pub mod log;

pub use crate::error::AuditError;
pub use crate::events::{AuditAction, AuditEvent};
pub use crate::log::{AuditLog, JsonLinesAuditLog, RecordingAuditLog, TracingAuditLog};
