use locreminder_core::{DraftError, Reminder, ReminderDraft};
use serde_json::json;

#[test]
fn reminder_serializes_with_flat_field_names() {
    let reminder = Reminder::with_id("r-1", "Title1")
        .described("Description1")
        .located_at("Pak Datuk", 1.5, 101.25);

    let value = serde_json::to_value(&reminder).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "r-1",
            "title": "Title1",
            "description": "Description1",
            "location": "Pak Datuk",
            "latitude": 1.5,
            "longitude": 101.25,
        })
    );

    let back: Reminder = serde_json::from_value(value).unwrap();
    assert_eq!(back, reminder);
}

#[test]
fn unlocated_reminder_serializes_nulls() {
    let value = serde_json::to_value(Reminder::with_id("r-2", "bare")).unwrap();
    assert!(value["location"].is_null());
    assert!(value["latitude"].is_null());
}

#[test]
fn drafts_get_distinct_ids() {
    assert_ne!(ReminderDraft::new().id, ReminderDraft::new().id);
}

#[test]
fn draft_with_location_label_but_blank_title_is_rejected() {
    let draft = ReminderDraft::new().titled("").labelled("Lala");
    assert_eq!(draft.into_reminder(), Err(DraftError::MissingTitle));
}
