//! summarize-store
//!
//! Record data and module settings access. The host platform implements
//! [`RecordStore`] and [`SettingsStore`]; [`MemoryStore`] backs tests and
//! local tooling.

pub mod error;
pub mod memory;
pub mod records;
pub mod settings;

pub use crate::error::StoreError;
pub use crate::memory::{MemoryStore, WriteLogEntry};
pub use crate::records::{RecordStore, WriteReport};
pub use crate::settings::SettingsStore;
