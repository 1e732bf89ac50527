use summarize_core::{EventId, ProjectTopology, RepeatKind, RepeatScope};

use crate::resolve::ResolvedFields;

/// Decide how a configuration's data is scoped in `event`.
///
/// A repeating event wins outright. Otherwise the configuration repeats by
/// form only when every resolved form is one of the event's repeating
/// forms; a valid configuration then has exactly one form.
pub fn classify(
    event: &EventId,
    resolved: &ResolvedFields,
    topology: &dyn ProjectTopology,
) -> RepeatKind {
    match topology.repeat_scope(event) {
        RepeatScope::WholeEvent => RepeatKind::ByEvent,
        RepeatScope::Forms { forms: repeating } => match resolved.forms.first() {
            Some(first) if resolved.forms.iter().all(|form| repeating.contains(form)) => {
                RepeatKind::ByForm(first.clone())
            }
            _ => RepeatKind::NoRepeat,
        },
        RepeatScope::None => RepeatKind::NoRepeat,
    }
}
