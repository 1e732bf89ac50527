//! summarize-render
//!
//! HTML block generation from decoded summary rows.

pub mod error;
pub mod render;
pub mod sanitize;

pub use crate::error::RenderError;
pub use crate::render::{BlockRenderer, render_block};
pub use crate::sanitize::{HtmlEscape, Sanitizer};
