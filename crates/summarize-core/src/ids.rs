use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

identifier!(
    /// Unique instrument (form) name within a project.
    FormName
);

identifier!(
    /// Variable name of a single field.
    FieldName
);

identifier!(
    /// Event identifier. Classic (non-longitudinal) projects have exactly one.
    EventId
);

identifier!(RecordId);

impl FormName {
    /// The synthetic "form complete" status field every form carries.
    pub fn status_field(&self) -> FieldName {
        FieldName(format!("{}_complete", self.0))
    }
}

/// Split admin-entered free text into identifiers.
///
/// Any character that cannot appear in a variable name (anything other than
/// ASCII letters, digits and `_`) separates entries; empty pieces are dropped.
/// `"demographics, vitals\nlabs"` yields three entries.
pub fn parse_identifier_list<T: From<String>>(text: &str) -> Vec<T> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|piece| !piece.is_empty())
        .map(|piece| T::from(piece.to_string()))
        .collect()
}
