use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::{EventId, FieldName, FormName};

/// Field element type as reported by the project data dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    Text,
    Textarea,
    Select,
    Radio,
    YesNo,
    TrueFalse,
    Checkbox,
    Sql,
    Calc,
    Slider,
    File,
    Descriptive,
    Other(String),
}

impl ElementType {
    pub fn parse(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "yesno" => Self::YesNo,
            "truefalse" => Self::TrueFalse,
            "checkbox" => Self::Checkbox,
            "sql" => Self::Sql,
            "calc" => Self::Calc,
            "slider" => Self::Slider,
            "file" => Self::File,
            "descriptive" => Self::Descriptive,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::YesNo => "yesno",
            Self::TrueFalse => "truefalse",
            Self::Checkbox => "checkbox",
            Self::Sql => "sql",
            Self::Calc => "calc",
            Self::Slider => "slider",
            Self::File => "file",
            Self::Descriptive => "descriptive",
            Self::Other(other) => other,
        }
    }

    /// Text box or notes box: the only kinds that can hold a rendered block.
    pub fn is_free_text(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }
}

impl From<String> for ElementType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data dictionary entry for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: FieldName,
    pub form: FormName,
    pub element_type: ElementType,
    pub label: String,
    /// Raw option string for choice fields, `code, label` entries.
    #[serde(default)]
    pub enum_options: Option<String>,
}

impl FieldMeta {
    pub fn new(
        name: impl Into<FieldName>,
        form: impl Into<FormName>,
        element_type: ElementType,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            form: form.into(),
            element_type,
            label: label.into(),
            enum_options: None,
        }
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.enum_options = Some(options.into());
        self
    }
}

/// Which part of an event repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepeatScope {
    #[default]
    None,
    /// The whole event repeats; instances are not tied to a form.
    WholeEvent,
    /// Only the named forms repeat inside the event.
    Forms { forms: Vec<FormName> },
}

impl RepeatScope {
    pub fn repeating_forms(&self) -> &[FormName] {
        match self {
            Self::Forms { forms } => forms,
            _ => &[],
        }
    }
}

/// Read-only view of a project's data dictionary and event layout.
pub trait ProjectTopology {
    /// Fields of a form, in data dictionary order. `None` if the form does
    /// not exist.
    fn form_fields(&self, form: &FormName) -> Option<&[FieldName]>;

    fn field(&self, field: &FieldName) -> Option<&FieldMeta>;

    /// Forms enabled in an event. `None` if the event does not exist.
    fn event_forms(&self, event: &EventId) -> Option<&[FormName]>;

    /// Display name of an event.
    fn event_name(&self, event: &EventId) -> Option<&str>;

    fn repeat_scope(&self, event: &EventId) -> RepeatScope;

    fn form_exists(&self, form: &FormName) -> bool {
        self.form_fields(form).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    pub name: String,
    pub forms: Vec<FormName>,
    #[serde(default)]
    pub repeat: RepeatScope,
}

impl EventMeta {
    pub fn new<F: Into<FormName>>(name: impl Into<String>, forms: impl IntoIterator<Item = F>) -> Self {
        Self {
            name: name.into(),
            forms: forms.into_iter().map(Into::into).collect(),
            repeat: RepeatScope::None,
        }
    }

    pub fn with_repeat(mut self, repeat: RepeatScope) -> Self {
        self.repeat = repeat;
        self
    }
}

/// In-memory [`ProjectTopology`], loaded from a JSON export of the project
/// metadata or assembled with the builder methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub forms: IndexMap<FormName, Vec<FieldName>>,
    #[serde(default)]
    pub fields: IndexMap<FieldName, FieldMeta>,
    #[serde(default)]
    pub events: IndexMap<EventId, EventMeta>,
}

const FORM_STATUS_OPTIONS: &str = "0, Incomplete\\n1, Unverified\\n2, Complete";

impl ProjectMetadata {
    /// Parse a metadata document. Forms missing from the `forms` map are
    /// rebuilt from the field list, in field order.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut metadata: Self = serde_json::from_str(json)?;
        let fields: Vec<(FieldName, FormName)> = metadata
            .fields
            .values()
            .map(|meta| (meta.name.clone(), meta.form.clone()))
            .collect();
        let missing: Vec<FormName> = fields
            .iter()
            .map(|(_, form)| form.clone())
            .filter(|form| !metadata.forms.contains_key(form))
            .collect();
        for (field, form) in fields {
            if missing.contains(&form) {
                metadata.forms.entry(form).or_default().push(field);
            }
        }
        Ok(metadata)
    }

    /// Add a field, appending it to its form (created on first use).
    pub fn with_field(mut self, meta: FieldMeta) -> Self {
        let form_fields = self.forms.entry(meta.form.clone()).or_default();
        if !form_fields.contains(&meta.name) {
            form_fields.push(meta.name.clone());
        }
        self.fields.insert(meta.name.clone(), meta);
        self
    }

    /// Add the `<form>_complete` status field the host appends to every form.
    pub fn with_form_status(self, form: impl Into<FormName>) -> Self {
        let form = form.into();
        let meta = FieldMeta::new(form.status_field(), form, ElementType::Select, "Complete?")
            .with_options(FORM_STATUS_OPTIONS);
        self.with_field(meta)
    }

    pub fn with_event(mut self, id: impl Into<EventId>, event: EventMeta) -> Self {
        self.events.insert(id.into(), event);
        self
    }
}

impl ProjectTopology for ProjectMetadata {
    fn form_fields(&self, form: &FormName) -> Option<&[FieldName]> {
        self.forms.get(form).map(Vec::as_slice)
    }

    fn field(&self, field: &FieldName) -> Option<&FieldMeta> {
        self.fields.get(field)
    }

    fn event_forms(&self, event: &EventId) -> Option<&[FormName]> {
        self.events.get(event).map(|e| e.forms.as_slice())
    }

    fn event_name(&self, event: &EventId) -> Option<&str> {
        self.events.get(event).map(|e| e.name.as_str())
    }

    fn repeat_scope(&self, event: &EventId) -> RepeatScope {
        self.events
            .get(event)
            .map(|e| e.repeat.clone())
            .unwrap_or_default()
    }
}
