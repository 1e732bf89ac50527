use summarize_core::{ElementType, FieldMeta, RawValue};

const YES_NO_OPTIONS: &str = "1, Yes\n0, No";
const TRUE_FALSE_OPTIONS: &str = "1, True\n0, False";

/// One `code, label` entry of a choice field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: String,
    pub label: String,
}

/// Parse a field's option string.
///
/// Entries are separated by newlines or by the literal two-character `\n`
/// the data dictionary stores. Each entry splits at its first comma; labels
/// may contain further commas.
pub fn parse_options(raw: &str) -> Vec<ChoiceOption> {
    raw.split("\\n")
        .flat_map(|chunk| chunk.split('\n'))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(',') {
            Some((code, label)) => ChoiceOption {
                code: code.trim().to_string(),
                label: label.trim().to_string(),
            },
            None => ChoiceOption {
                code: entry.to_string(),
                label: entry.to_string(),
            },
        })
        .collect()
}

/// How a field's stored value turns into display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// One stored code, shown as its label.
    Choice(Vec<ChoiceOption>),
    /// A code → checked map, shown as the labels of checked codes.
    Checkbox(Vec<ChoiceOption>),
    /// Shown verbatim.
    Plain,
}

impl FieldKind {
    pub fn of(meta: &FieldMeta) -> Self {
        let options = |implicit: &str| {
            parse_options(meta.enum_options.as_deref().filter(|o| !o.trim().is_empty()).unwrap_or(implicit))
        };

        match meta.element_type {
            ElementType::Select | ElementType::Radio | ElementType::Sql => {
                Self::Choice(options(""))
            }
            ElementType::YesNo => Self::Choice(options(YES_NO_OPTIONS)),
            ElementType::TrueFalse => Self::Choice(options(TRUE_FALSE_OPTIONS)),
            ElementType::Checkbox => Self::Checkbox(options("")),
            _ => Self::Plain,
        }
    }

    pub fn decode(&self, raw: &RawValue) -> String {
        match (self, raw) {
            (Self::Choice(options), RawValue::Text(code)) => join_labels(
                options
                    .iter()
                    .filter(|option| option.code == code.trim()),
            ),
            (Self::Checkbox(options), RawValue::Checkbox(checked)) => join_labels(
                options.iter().filter(|option| {
                    checked
                        .get(&option.code)
                        .is_some_and(|value| value.trim() == "1")
                }),
            ),
            (Self::Plain, RawValue::Text(text)) => text.clone(),
            (Self::Plain, RawValue::Checkbox(checked)) => checked
                .iter()
                .filter(|(_, value)| value.trim() == "1")
                .map(|(code, _)| code.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            (Self::Choice(_), RawValue::Checkbox(_)) | (Self::Checkbox(_), RawValue::Text(_)) => {
                String::new()
            }
        }
    }
}

fn join_labels<'a>(options: impl Iterator<Item = &'a ChoiceOption>) -> String {
    options
        .map(|option| option.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
