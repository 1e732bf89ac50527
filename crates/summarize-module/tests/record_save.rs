use summarize_audit::{AuditAction, RecordingAuditLog};
use summarize_core::{
    DataSlot, ElementType, EventMeta, FieldMeta, FieldName, FormName, ProjectMetadata, RawInstance,
    RawValue, RecordId, RepeatScope,
};
use summarize_module::{SaveEvent, SaveOutcome, SkipReason, Summarizer};
use summarize_render::HtmlEscape;
use summarize_store::MemoryStore;

fn project() -> ProjectMetadata {
    ProjectMetadata::default()
        .with_field(FieldMeta::new("name", "demographics", ElementType::Text, "Name"))
        .with_field(FieldMeta::new("dob", "demographics", ElementType::Text, "Date of birth"))
        .with_field(
            FieldMeta::new("dx", "demographics", ElementType::Select, "Diagnosis")
                .with_options("A12, Hypertension\\nB20, Diabetes"),
        )
        .with_field(FieldMeta::new("summary_notes", "summary", ElementType::Textarea, "Summary"))
        .with_field(
            FieldMeta::new("flags", "summary", ElementType::Checkbox, "Flags")
                .with_options("1, Smoker"),
        )
        .with_field(FieldMeta::new("drug", "medications", ElementType::Text, "Drug"))
        .with_field(FieldMeta::new("med_summary", "medications", ElementType::Textarea, "Medication summary"))
        .with_field(FieldMeta::new("pain", "followup", ElementType::Text, "Pain"))
        .with_field(FieldMeta::new("followup_summary", "followup", ElementType::Textarea, "Follow-up summary"))
        .with_event("E1", EventMeta::new("Baseline", ["demographics", "summary"]))
        .with_event(
            "E2",
            EventMeta::new("Treatment", ["medications"]).with_repeat(RepeatScope::Forms {
                forms: vec![FormName::from("medications")],
            }),
        )
        .with_event(
            "E3",
            EventMeta::new("Follow-up", ["followup"]).with_repeat(RepeatScope::WholeEvent),
        )
}

fn demographics_summary() -> RawInstance {
    RawInstance {
        include_forms: Some("demographics".to_string()),
        exclude_fields: Some("dob".to_string()),
        destination_field: Some("summary_notes".to_string()),
        event_id: Some("E1".to_string()),
        ..RawInstance::default()
    }
}

fn baseline_record(store: &MemoryStore) {
    let slot = DataSlot::Event { event: "E1".into() };
    store.insert("1001", slot.clone(), "name", RawValue::text("Jane"));
    store.insert("1001", slot.clone(), "dob", RawValue::text("1970-02-03"));
    store.insert("1001", slot, "dx", RawValue::text("A12"));
}

fn written_html(store: &MemoryStore, record: &str, slot: &DataSlot, field: &str) -> String {
    match store.value(&RecordId::from(record), slot, &FieldName::from(field)) {
        Some(RawValue::Text(html)) => html,
        other => panic!("expected rendered block, got {other:?}"),
    }
}

#[test]
fn demographics_summary_end_to_end() {
    let project = project();
    let store = MemoryStore::with_instances(vec![demographics_summary()]);
    let audit = RecordingAuditLog::new();
    baseline_record(&store);
    let summarizer = Summarizer::new(&project, &store, &store, &audit, &HtmlEscape).unwrap();

    let instances = summarizer.instances().unwrap();
    assert_eq!(
        instances[0].resolved().field_names(),
        vec![FieldName::from("name"), FieldName::from("dx")]
    );

    let outcomes = summarizer
        .on_record_save(&SaveEvent::new("1001", "E1").with_instrument("demographics"))
        .unwrap();

    let slot = DataSlot::Event { event: "E1".into() };
    assert_eq!(outcomes, vec![SaveOutcome::Written { slot: slot.clone() }]);

    let html = written_html(&store, "1001", &slot, "summary_notes");
    assert_eq!(html.matches("<tr").count(), 2);
    let name_row = html.find("<tr style=\"background: #fefefe;\"><td style=\"padding: 5px;\" valign=\"top\">Name</td>");
    let dx_row = html.find("<tr style=\"background: #fafafa;\"><td style=\"padding: 5px;\" valign=\"top\">Diagnosis</td>");
    assert!(name_row.is_some() && dx_row.is_some() && name_row < dx_row);
    assert!(html.contains(">Jane</td>"));
    assert!(html.contains(">Hypertension</td>"));
    assert!(!html.contains("1970-02-03"));
    assert!(audit.events().is_empty());
}

#[test]
fn checkbox_destination_is_reported_and_not_written() {
    let project = project();
    let mut raw = demographics_summary();
    raw.destination_field = Some("flags".to_string());
    let store = MemoryStore::with_instances(vec![raw]);
    let audit = RecordingAuditLog::new();
    baseline_record(&store);
    let summarizer = Summarizer::new(&project, &store, &store, &audit, &HtmlEscape).unwrap();

    let outcomes = summarizer.on_record_save(&SaveEvent::new("1001", "E1")).unwrap();

    match outcomes.as_slice() {
        [SaveOutcome::Invalid { messages }] => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("flags"));
            assert!(messages[0].contains("not text or textarea"));
        }
        other => panic!("expected one invalid outcome, got {other:?}"),
    }
    assert!(store.writes().is_empty());
    assert_eq!(audit.events()[0].action, AuditAction::ValidationFailed);
}

#[test]
fn saves_outside_the_configuration_are_skipped() {
    let project = project();
    let store = MemoryStore::with_instances(vec![demographics_summary()]);
    let audit = RecordingAuditLog::new();
    let summarizer = Summarizer::new(&project, &store, &store, &audit, &HtmlEscape).unwrap();

    let other_event = summarizer.on_record_save(&SaveEvent::new("1001", "E2")).unwrap();
    assert_eq!(
        other_event,
        vec![SaveOutcome::Skipped {
            reason: SkipReason::EventMismatch
        }]
    );

    let other_form = summarizer
        .on_record_save(&SaveEvent::new("1001", "E1").with_instrument("medications"))
        .unwrap();
    assert_eq!(
        other_form,
        vec![SaveOutcome::Skipped {
            reason: SkipReason::InstrumentOutOfScope
        }]
    );

    assert!(store.writes().is_empty());
}

#[test]
fn destination_form_saves_still_render() {
    let project = project();
    let store = MemoryStore::with_instances(vec![demographics_summary()]);
    let audit = RecordingAuditLog::new();
    baseline_record(&store);
    let summarizer = Summarizer::new(&project, &store, &store, &audit, &HtmlEscape).unwrap();

    let outcomes = summarizer
        .on_record_save(&SaveEvent::new("1001", "E1").with_instrument("summary"))
        .unwrap();
    assert!(matches!(outcomes[0], SaveOutcome::Written { .. }));
}

#[test]
fn deleting_a_destination_form_instance_is_skipped() {
    let project = project();
    let store = MemoryStore::with_instances(vec![RawInstance {
        include_forms: Some("medications".to_string()),
        destination_field: Some("med_summary".to_string()),
        event_id: Some("E2".to_string()),
        ..RawInstance::default()
    }]);
    let audit = RecordingAuditLog::new();
    let summarizer = Summarizer::new(&project, &store, &store, &audit, &HtmlEscape).unwrap();

    let outcomes = summarizer
        .on_record_save(
            &SaveEvent::new("5", "E2")
                .with_instance(2)
                .deleting_instance_of("medications"),
        )
        .unwrap();

    assert_eq!(
        outcomes,
        vec![SaveOutcome::Skipped {
            reason: SkipReason::InstanceDeleted
        }]
    );
    assert!(store.writes().is_empty());
}

#[test]
fn repeating_form_writes_to_the_saved_instance() {
    let project = project();
    let store = MemoryStore::with_instances(vec![RawInstance {
        include_forms: Some("medications".to_string()),
        destination_field: Some("med_summary".to_string()),
        event_id: Some("E2".to_string()),
        ..RawInstance::default()
    }]);
    let audit = RecordingAuditLog::new();
    let instance = |n| DataSlot::FormInstance {
        event: "E2".into(),
        form: "medications".into(),
        instance: n,
    };
    store.insert("5", instance(1), "drug", RawValue::text("Aspirin"));
    store.insert("5", instance(2), "drug", RawValue::text("Metformin"));
    let summarizer = Summarizer::new(&project, &store, &store, &audit, &HtmlEscape).unwrap();

    let outcomes = summarizer
        .on_record_save(&SaveEvent::new("5", "E2").with_instance(2))
        .unwrap();

    assert_eq!(outcomes, vec![SaveOutcome::Written { slot: instance(2) }]);
    let html = written_html(&store, "5", &instance(2), "med_summary");
    assert!(html.contains("Metformin"));
    assert!(!html.contains("Aspirin"));
}

#[test]
fn repeating_event_writes_to_the_unnamed_instance() {
    let project = project();
    let store = MemoryStore::with_instances(vec![RawInstance {
        include_fields: Some("pain".to_string()),
        destination_field: Some("followup_summary".to_string()),
        event_id: Some("E3".to_string()),
        ..RawInstance::default()
    }]);
    let audit = RecordingAuditLog::new();
    let slot = DataSlot::EventInstance {
        event: "E3".into(),
        instance: 3,
    };
    store.insert("8", slot.clone(), "pain", RawValue::text("4"));
    let summarizer = Summarizer::new(&project, &store, &store, &audit, &HtmlEscape).unwrap();

    let outcomes = summarizer
        .on_record_save(&SaveEvent::new("8", "E3").with_instance(3))
        .unwrap();

    assert_eq!(outcomes, vec![SaveOutcome::Written { slot: slot.clone() }]);
    assert!(written_html(&store, "8", &slot, "followup_summary").contains(">4</td>"));
}

#[test]
fn write_failure_does_not_stop_sibling_instances() {
    let project = project().with_field(FieldMeta::new(
        "second_summary",
        "summary",
        ElementType::Text,
        "Second summary",
    ));
    let mut second = demographics_summary();
    second.destination_field = Some("second_summary".to_string());
    let store = MemoryStore::with_instances(vec![demographics_summary(), second]);
    store.reject_field("summary_notes");
    let audit = RecordingAuditLog::new();
    baseline_record(&store);
    let summarizer = Summarizer::new(&project, &store, &store, &audit, &HtmlEscape).unwrap();

    let outcomes = summarizer.on_record_save(&SaveEvent::new("1001", "E1")).unwrap();

    assert!(matches!(outcomes[0], SaveOutcome::Failed { .. }));
    assert!(matches!(outcomes[1], SaveOutcome::Written { .. }));
    assert_eq!(store.writes().len(), 1);
    assert_eq!(audit.events()[0].action, AuditAction::WriteFailed);
    assert_eq!(audit.events()[0].record, Some(RecordId::from("1001")));
}
