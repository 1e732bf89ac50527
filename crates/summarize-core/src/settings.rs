use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Sub-setting keys of one summarize instance, as named in the module's
/// settings definition.
pub mod key {
    pub const INCLUDE_FORMS: &str = "include_forms";
    pub const INCLUDE_FIELDS: &str = "include_fields";
    pub const EXCLUDE_FIELDS: &str = "exclude_fields";
    pub const EVENT_ID: &str = "event_id";
    pub const DESTINATION_FIELD: &str = "destination_field";
    pub const TITLE: &str = "title";
    pub const DISP_VALUE_UNDER_NAME: &str = "disp_value_under_name";
    pub const FIELD_LABEL_WIDTH: &str = "field_label_width";
    pub const MAX_CHARS_PER_COLUMN: &str = "max_chars_per_column";
    pub const DISPLAY_BLANKS: &str = "display_blanks";
    pub const PRIMARY_COLOR: &str = "primary_color";
    pub const SECONDARY_COLOR: &str = "secondary_color";
    pub const REMOVE_FORM_STATUS: &str = "remove_form_status";
    pub const REFRESH: &str = "refresh";
}

/// Every key that belongs to the repeating `instance` sub-setting block.
pub const INSTANCE_KEYS: &[&str] = &[
    key::INCLUDE_FORMS,
    key::INCLUDE_FIELDS,
    key::EXCLUDE_FIELDS,
    key::EVENT_ID,
    key::DESTINATION_FIELD,
    key::TITLE,
    key::DISP_VALUE_UNDER_NAME,
    key::FIELD_LABEL_WIDTH,
    key::MAX_CHARS_PER_COLUMN,
    key::DISPLAY_BLANKS,
    key::PRIMARY_COLOR,
    key::SECONDARY_COLOR,
    key::REMOVE_FORM_STATUS,
    key::REFRESH,
];

/// One summarize instance exactly as the host's settings subsystem hands it
/// over: free text, loosely typed flags and numbers.
///
/// Parse it into a [`SummarizeConfig`](crate::config::SummarizeConfig) once;
/// nothing downstream reads a `RawInstance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInstance {
    #[serde(deserialize_with = "lenient_text")]
    pub include_forms: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub include_fields: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub exclude_fields: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub event_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub destination_field: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub disp_value_under_name: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub field_label_width: Option<i64>,
    #[serde(deserialize_with = "lenient_number")]
    pub max_chars_per_column: Option<i64>,
    #[serde(deserialize_with = "lenient_flag")]
    pub display_blanks: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub primary_color: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub secondary_color: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub remove_form_status: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub refresh: bool,
}

/// Separator between a sub-setting key and its instance index in the
/// configuration dialog's input names (`include_forms____0`).
pub const INDEX_SEPARATOR: &str = "____";

/// Highest instance index accepted from a settings snapshot.
pub const MAX_INSTANCE_INDEX: usize = 999;

/// Transpose host settings into one [`RawInstance`] per index.
///
/// Three shapes are accepted and may be mixed:
/// - saved settings, one array per key: `{"title": ["a", "b"]}`
/// - the dialog's form snapshot, one entry per input: `{"title____1": "b"}`
/// - a plain value, which belongs to the first instance: `{"title": "a"}`
///
/// Keys outside [`INSTANCE_KEYS`] are ignored; an instance missing a key
/// simply leaves it unset.
pub fn transpose_sub_settings(settings: &Map<String, Value>) -> Result<Vec<RawInstance>, CoreError> {
    let mut rows: Vec<Map<String, Value>> = Vec::new();

    for (name, value) in settings {
        if value.is_null() {
            continue;
        }

        let (key, index) = match name.split_once(INDEX_SEPARATOR) {
            Some((key, index)) => (key, Some(index)),
            None => (name.as_str(), None),
        };
        if !INSTANCE_KEYS.contains(&key) {
            continue;
        }

        match (index, value) {
            (Some(index), value) => {
                let index = index
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n <= MAX_INSTANCE_INDEX)
                    .ok_or_else(|| CoreError::InvalidSetting {
                        key: name.clone(),
                        message: format!("'{index}' is not an instance index"),
                    })?;
                set_cell(&mut rows, index, key, value);
            }
            (None, Value::Array(values)) => {
                for (index, value) in values.iter().enumerate() {
                    set_cell(&mut rows, index, key, value);
                }
            }
            (None, value) => set_cell(&mut rows, 0, key, value),
        }
    }

    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(CoreError::from))
        .collect()
}

fn set_cell(rows: &mut Vec<Map<String, Value>>, index: usize, key: &str, value: &Value) {
    if rows.len() <= index {
        rows.resize_with(index + 1, Map::new);
    }
    rows[index].insert(key.to_string(), value.clone());
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        // Multi-select pickers hand back arrays; the identifier parser splits on commas.
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(other @ Value::Object(_)) => {
            return Err(serde::de::Error::custom(format!("expected text, got {other}")));
        }
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "on" | "yes"
        ),
        _ => false,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    })
}
