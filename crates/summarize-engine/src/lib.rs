//! summarize-engine
//!
//! Field resolution, configuration validation, repeat-scope classification
//! and value decoding. Pure logic over a [`ProjectTopology`]; reading and
//! writing record data is the caller's job.
//!
//! [`ProjectTopology`]: summarize_core::ProjectTopology

pub mod decode;
pub mod repeat;
pub mod resolve;
pub mod rows;
pub mod validate;

pub use crate::decode::{ChoiceOption, FieldKind};
pub use crate::repeat::classify;
pub use crate::resolve::{ResolvedFields, resolve};
pub use crate::rows::{SummaryRow, summary_rows};
pub use crate::validate::{ConfigIssue, Validation, validate};
