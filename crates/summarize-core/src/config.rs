use serde::{Deserialize, Serialize};

use crate::ids::{EventId, FieldName, FormName, parse_identifier_list};
use crate::settings::RawInstance;

pub const DEFAULT_PRIMARY_COLOR: &str = "#fefefe";
pub const DEFAULT_SECONDARY_COLOR: &str = "#fafafa";

/// Bounds applied to the label column width, in percent.
pub const MIN_LABEL_WIDTH: u32 = 10;
pub const MAX_LABEL_WIDTH: u32 = 90;

/// A single summarize configuration, parsed once from a [`RawInstance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeConfig {
    pub include_forms: Vec<FormName>,
    pub include_fields: Vec<FieldName>,
    pub exclude_fields: Vec<FieldName>,
    pub event_id: Option<EventId>,
    pub destination_field: Option<FieldName>,
    pub title: Option<String>,
    pub layout: LayoutOptions,
    /// Drop each included form's `<form>_complete` status field.
    pub remove_form_status: bool,
    /// One-shot request to re-render every existing record.
    pub refresh: bool,
}

/// How the rendered block is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Put every value on its own line under its label.
    pub disp_value_under_name: bool,
    /// Requested label column width in percent, before clamping.
    pub field_label_width: Option<i64>,
    /// Values longer than this (in characters) are moved under their label.
    /// `Some(0)` moves every value.
    pub max_chars_per_column: Option<usize>,
    pub display_blanks: bool,
    pub primary_color: String,
    pub secondary_color: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            disp_value_under_name: false,
            field_label_width: None,
            max_chars_per_column: None,
            display_blanks: false,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
        }
    }
}

impl LayoutOptions {
    /// Effective label column width, clamped to
    /// [`MIN_LABEL_WIDTH`]..=[`MAX_LABEL_WIDTH`].
    pub fn label_width(&self) -> Option<u32> {
        self.field_label_width
            .map(|w| w.clamp(MIN_LABEL_WIDTH as i64, MAX_LABEL_WIDTH as i64) as u32)
    }

    /// Value column width: whatever the label column leaves.
    pub fn value_width(&self) -> Option<u32> {
        self.label_width().map(|w| 100 - w)
    }

    /// Primary row and container color, or the default when the stored value
    /// is not a plain CSS color.
    pub fn primary(&self) -> &str {
        css_color_or(&self.primary_color, DEFAULT_PRIMARY_COLOR)
    }

    pub fn secondary(&self) -> &str {
        css_color_or(&self.secondary_color, DEFAULT_SECONDARY_COLOR)
    }

    /// Whether a value of `len` characters must sit under its label.
    pub fn forces_stacked(&self, len: usize) -> bool {
        match self.max_chars_per_column {
            Some(0) => true,
            Some(max) => len > max,
            None => false,
        }
    }
}

impl SummarizeConfig {
    pub fn from_raw(raw: &RawInstance) -> Self {
        let defaults = LayoutOptions::default();

        Self {
            include_forms: list(&raw.include_forms),
            include_fields: list(&raw.include_fields),
            exclude_fields: list(&raw.exclude_fields),
            event_id: non_blank(&raw.event_id).map(EventId::new),
            destination_field: non_blank(&raw.destination_field).map(FieldName::new),
            title: non_blank(&raw.title),
            layout: LayoutOptions {
                disp_value_under_name: raw.disp_value_under_name,
                field_label_width: raw.field_label_width,
                max_chars_per_column: raw
                    .max_chars_per_column
                    .and_then(|n| usize::try_from(n).ok()),
                display_blanks: raw.display_blanks,
                primary_color: non_blank(&raw.primary_color)
                    .filter(|c| is_css_color(c))
                    .unwrap_or(defaults.primary_color),
                secondary_color: non_blank(&raw.secondary_color)
                    .filter(|c| is_css_color(c))
                    .unwrap_or(defaults.secondary_color),
            },
            remove_form_status: raw.remove_form_status,
            refresh: raw.refresh,
        }
    }

    /// Heading used in reports: `#3 'Vitals'`, or `#3` when untitled.
    /// `index` is zero-based.
    pub fn display_name(&self, index: usize) -> String {
        match &self.title {
            Some(title) => format!("#{} '{}'", index + 1, title),
            None => format!("#{}", index + 1),
        }
    }
}

fn list<T: From<String>>(text: &Option<String>) -> Vec<T> {
    text.as_deref().map(parse_identifier_list).unwrap_or_default()
}

fn non_blank(text: &Option<String>) -> Option<String> {
    text.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, or a named color such as
/// `lightyellow`. Anything else could break out of an inline style.
pub fn is_css_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

fn css_color_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if is_css_color(value) { value } else { fallback }
}
