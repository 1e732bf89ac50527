use serde::Serialize;

use summarize_core::{FieldName, ProjectTopology, RecordValues};

use crate::decode::FieldKind;
use crate::resolve::ResolvedFields;

/// A decoded field ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub field: FieldName,
    pub label: String,
    pub value: String,
}

/// Decode `values` into display rows, in resolved-field order.
///
/// Fields with no stored value decode to empty text. Empty rows are dropped
/// unless `display_blanks` is set.
pub fn summary_rows(
    resolved: &ResolvedFields,
    values: &RecordValues,
    topology: &dyn ProjectTopology,
    display_blanks: bool,
) -> Vec<SummaryRow> {
    resolved
        .fields
        .iter()
        .filter_map(|(field, label)| {
            let value = match values.get(field) {
                Some(raw) => topology
                    .field(field)
                    .map(FieldKind::of)
                    .unwrap_or(FieldKind::Plain)
                    .decode(raw),
                None => String::new(),
            };

            (display_blanks || !value.is_empty()).then(|| SummaryRow {
                field: field.clone(),
                label: label.clone(),
                value,
            })
        })
        .collect()
}
