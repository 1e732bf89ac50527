use summarize_core::{
    ElementType, EventMeta, FieldMeta, FormName, ProjectMetadata, RawInstance, RepeatScope,
    SummarizeConfig,
};
use summarize_engine::{ConfigIssue, resolve, validate};

fn project() -> ProjectMetadata {
    ProjectMetadata::default()
        .with_field(FieldMeta::new("name", "demographics", ElementType::Text, "Name"))
        .with_field(FieldMeta::new("dob", "demographics", ElementType::Text, "Date of birth"))
        .with_field(
            FieldMeta::new("dx", "demographics", ElementType::Select, "Diagnosis")
                .with_options("A12, Hypertension"),
        )
        .with_field(FieldMeta::new("summary_notes", "demographics", ElementType::Textarea, "Summary"))
        .with_field(
            FieldMeta::new("flags", "demographics", ElementType::Checkbox, "Flags")
                .with_options("1, Smoker\\n2, Allergies"),
        )
        .with_field(FieldMeta::new("med", "medications", ElementType::Text, "Medication"))
        .with_field(FieldMeta::new("labs_note", "labs", ElementType::Text, "Lab note"))
        .with_event(
            "E1",
            EventMeta::new("Baseline", ["demographics", "medications"]).with_repeat(
                RepeatScope::Forms {
                    forms: vec![FormName::from("medications")],
                },
            ),
        )
}

fn raw(forms: &str, destination: &str) -> RawInstance {
    RawInstance {
        include_forms: Some(forms.to_string()),
        event_id: Some("E1".to_string()),
        destination_field: Some(destination.to_string()),
        ..RawInstance::default()
    }
}

fn check(raw: &RawInstance) -> Vec<ConfigIssue> {
    let project = project();
    let config = SummarizeConfig::from_raw(raw);
    let resolved = resolve(&config, &project);
    validate(&config, &resolved, &project).issues
}

#[test]
fn valid_configuration_has_no_issues() {
    let mut raw = raw("demographics", "summary_notes");
    raw.exclude_fields = Some("dob".to_string());
    assert!(check(&raw).is_empty());
}

#[test]
fn checkbox_destination_is_the_only_issue() {
    let issues = check(&raw("demographics", "flags"));
    assert_eq!(issues.len(), 1);
    assert!(matches!(issues[0], ConfigIssue::DestinationNotText { .. }));
    assert_eq!(
        issues[0].to_string(),
        "Destination field flags is of type checkbox, not text or textarea"
    );
}

#[test]
fn every_failure_is_reported() {
    let issues = check(&RawInstance {
        include_forms: Some("nope".to_string()),
        include_fields: Some("ghost".to_string()),
        exclude_fields: Some("phantom".to_string()),
        ..RawInstance::default()
    });

    assert_eq!(
        issues,
        vec![
            ConfigIssue::MissingEvent,
            ConfigIssue::UnknownForm { form: "nope".into() },
            ConfigIssue::UnknownField { field: "ghost".into() },
            ConfigIssue::UnknownExcludedField { field: "phantom".into() },
            ConfigIssue::MissingDestination,
        ]
    );
}

#[test]
fn unknown_form_is_also_checked_against_the_event() {
    let project = project().with_field(FieldMeta::new(
        "med_summary",
        "medications",
        ElementType::Text,
        "Medication summary",
    ));
    let config = SummarizeConfig::from_raw(&raw("medications ghost", "med_summary"));
    let resolved = resolve(&config, &project);

    let messages = validate(&config, &resolved, &project).messages();
    assert_eq!(
        messages,
        vec![
            "Form ghost is not found in project".to_string(),
            "Form ghost is not found/enabled in Baseline".to_string(),
            "If a form is repeating in an event, only fields from that single form can be summarized (found: medications, ghost)".to_string(),
        ]
    );
}

#[test]
fn unknown_destination() {
    let issues = check(&raw("demographics", "nowhere"));
    assert_eq!(
        issues,
        vec![ConfigIssue::UnknownDestination { field: "nowhere".into() }]
    );
}

#[test]
fn forms_must_be_enabled_in_the_event() {
    let mut raw = raw("demographics", "summary_notes");
    raw.include_fields = Some("labs_note".to_string());

    let issues = check(&raw);
    assert_eq!(
        issues,
        vec![ConfigIssue::FormNotInEvent {
            form: "labs".into(),
            event_name: "Baseline".to_string(),
        }]
    );
    assert_eq!(issues[0].to_string(), "Form labs is not found/enabled in Baseline");
}

#[test]
fn repeating_form_cannot_be_mixed_with_other_forms() {
    let mut raw = raw("medications", "summary_notes");
    raw.include_fields = Some("name".to_string());

    let issues = check(&raw);
    assert!(matches!(
        issues.as_slice(),
        [ConfigIssue::RepeatingFormMixed { forms }] if forms.len() == 2
    ));
}

#[test]
fn repeating_form_alone_is_valid() {
    let project = project().with_field(FieldMeta::new(
        "med_summary",
        "medications",
        ElementType::Text,
        "Medication summary",
    ));
    let config = SummarizeConfig::from_raw(&raw("medications", "med_summary"));
    let resolved = resolve(&config, &project);

    assert!(validate(&config, &resolved, &project).is_ok());
}
