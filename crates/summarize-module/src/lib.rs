//! summarize-module
//!
//! Orchestration for the Summarize module: builds instances from settings,
//! validates them, and re-renders destination fields when records or the
//! module configuration are saved.
//!
//! Public API:
//! - `Summarizer::on_config_save()`: validate every instance, run pending bulk refreshes
//! - `Summarizer::on_record_save()`: re-render every instance the save touches
//! - `validate_configs()`: numbered issue report across instances
//! - `config_status()`: live validation of unsaved settings for the config UI

pub mod error;
pub mod instance;
pub mod report;
pub mod save;
pub mod status;
pub mod summarizer;

pub use crate::error::ModuleError;
pub use crate::instance::SummarizeInstance;
pub use crate::report::{ConfigReport, validate_configs};
pub use crate::save::{SaveEvent, SaveOutcome, SkipReason};
pub use crate::status::{ConfigStatus, StatusRequest, config_status};
pub use crate::summarizer::{ConfigSaveSummary, RefreshSummary, Summarizer};
