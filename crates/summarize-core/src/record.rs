use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::FieldName;

/// A field value as the record store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    /// Checkbox fields: option code → `"1"` (checked) or `"0"`.
    Checkbox(IndexMap<String, String>),
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn checkbox<C, V>(codes: impl IntoIterator<Item = (C, V)>) -> Self
    where
        C: Into<String>,
        V: Into<String>,
    {
        Self::Checkbox(
            codes
                .into_iter()
                .map(|(code, value)| (code.into(), value.into()))
                .collect(),
        )
    }
}

impl Default for RawValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Field values of one record in one data slot.
pub type RecordValues = IndexMap<FieldName, RawValue>;
