use indexmap::IndexMap;

use summarize_core::{
    ElementType, EventMeta, FieldMeta, ProjectMetadata, RawInstance, RawValue, RecordValues,
    SummarizeConfig,
};
use summarize_engine::decode::parse_options;
use summarize_engine::{FieldKind, resolve, summary_rows};

fn select(options: &str) -> FieldKind {
    FieldKind::of(&FieldMeta::new("dx", "f", ElementType::Select, "Dx").with_options(options))
}

fn checkbox(options: &str) -> FieldKind {
    FieldKind::of(&FieldMeta::new("c", "f", ElementType::Checkbox, "C").with_options(options))
}

#[test]
fn options_split_on_stored_and_real_newlines() {
    let options = parse_options("1, One\\n2, Two, with comma\n 3 ,Three ");
    let pairs: Vec<(&str, &str)> = options
        .iter()
        .map(|o| (o.code.as_str(), o.label.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("1", "One"), ("2", "Two, with comma"), ("3", "Three")]
    );
}

#[test]
fn choice_decodes_to_its_label() {
    let kind = select("A12, Hypertension\\nB20, Diabetes");
    assert_eq!(kind.decode(&RawValue::text("B20")), "Diabetes");
}

#[test]
fn choice_without_a_match_is_empty() {
    assert_eq!(select("1, Yes").decode(&RawValue::text("7")), "");
}

#[test]
fn duplicate_codes_are_joined() {
    assert_eq!(select("1, First\\n1, Again").decode(&RawValue::text("1")), "First, Again");
}

#[test]
fn yes_no_uses_implicit_options() {
    let kind = FieldKind::of(&FieldMeta::new("ok", "f", ElementType::YesNo, "Ok?"));
    assert_eq!(kind.decode(&RawValue::text("0")), "No");
    let kind = FieldKind::of(&FieldMeta::new("ok", "f", ElementType::TrueFalse, "Ok?"));
    assert_eq!(kind.decode(&RawValue::text("1")), "True");
}

#[test]
fn checkbox_decodes_checked_labels() {
    let kind = checkbox("1, Smoker\\n2, Allergies\\n3, Asthma");
    let raw = RawValue::checkbox([("1", "1"), ("2", "0"), ("3", "1")]);
    assert_eq!(kind.decode(&raw), "Smoker, Asthma");
}

#[test]
fn checkbox_with_nothing_checked_is_empty() {
    let kind = checkbox("1, Smoker\\n2, Allergies");
    let raw = RawValue::checkbox([("1", "0"), ("2", "0")]);
    assert_eq!(kind.decode(&raw), "");
}

#[test]
fn plain_text_is_verbatim() {
    let kind = FieldKind::of(&FieldMeta::new("n", "f", ElementType::Textarea, "Notes"));
    assert_eq!(kind, FieldKind::Plain);
    assert_eq!(kind.decode(&RawValue::text("line 1\nline 2")), "line 1\nline 2");
}

#[test]
fn blank_rows_are_dropped_unless_requested() {
    let project = ProjectMetadata::default()
        .with_field(FieldMeta::new("name", "demographics", ElementType::Text, "Name"))
        .with_field(FieldMeta::new("dob", "demographics", ElementType::Text, "Date of birth"))
        .with_field(
            FieldMeta::new("dx", "demographics", ElementType::Select, "Diagnosis")
                .with_options("A12, Hypertension"),
        )
        .with_field(FieldMeta::new("summary_notes", "demographics", ElementType::Textarea, "Summary"))
        .with_event("E1", EventMeta::new("Baseline", ["demographics"]));
    let config = SummarizeConfig::from_raw(&RawInstance {
        include_forms: Some("demographics".to_string()),
        event_id: Some("E1".to_string()),
        destination_field: Some("summary_notes".to_string()),
        ..RawInstance::default()
    });
    let resolved = resolve(&config, &project);

    let mut values: RecordValues = IndexMap::new();
    values.insert("name".into(), RawValue::text("Jane"));
    values.insert("dob".into(), RawValue::text(""));
    values.insert("dx".into(), RawValue::text("A12"));

    let rows = summary_rows(&resolved, &values, &project, false);
    let shown: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.label.as_str(), r.value.as_str()))
        .collect();
    assert_eq!(shown, vec![("Name", "Jane"), ("Diagnosis", "Hypertension")]);

    let rows = summary_rows(&resolved, &values, &project, true);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].value, "");
}
