use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::error::AuditError;
use crate::events::AuditEvent;

/// Destination for audit entries.
pub trait AuditLog {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError>;
}

/// Emits every entry through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        event.emit();
        Ok(())
    }
}

/// Emits through `tracing` and keeps a copy of each entry.
#[derive(Debug, Default)]
pub struct RecordingAuditLog {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuditLog for RecordingAuditLog {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        event.emit();
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

/// Appends each entry to `writer` as one JSON line.
#[derive(Debug)]
pub struct JsonLinesAuditLog<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesAuditLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> AuditLog for JsonLinesAuditLog<W> {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&line).map_err(sink_error)?;
        writer.flush().map_err(sink_error)
    }
}

fn sink_error(e: std::io::Error) -> AuditError {
    AuditError::Sink(e.to_string())
}
