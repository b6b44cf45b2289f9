use listing_core::draft::{ActivityError, PropertyDraft, ScalarField, SetField};
use listing_core::utils::persistence;

#[test]
fn toggles_are_idempotent() {
    let mut draft = PropertyDraft::new();

    draft.toggle_set_field(SetField::Amenities, "Pool", true);
    draft.toggle_set_field(SetField::Amenities, "Pool", true);
    assert_eq!(draft.amenities, vec!["Pool".to_string()]);

    draft.toggle_set_field(SetField::Amenities, "Sauna", false);
    assert_eq!(draft.amenities, vec!["Pool".to_string()]);

    draft.toggle_set_field(SetField::Amenities, "Pool", false);
    draft.toggle_set_field(SetField::Amenities, "Pool", false);
    assert!(draft.amenities.is_empty());
}

#[test]
fn custom_activity_dedup_is_exact_and_case_sensitive() {
    let mut draft = PropertyDraft::new();
    draft.add_custom_activity("Sound Healing").unwrap();
    assert_eq!(
        draft.add_custom_activity("Sound Healing"),
        Err(ActivityError::DuplicateEntry)
    );
    // Trimming happens before the duplicate check.
    assert_eq!(
        draft.add_custom_activity("  Sound Healing  "),
        Err(ActivityError::DuplicateEntry)
    );
    // A different case is a different entry.
    draft.add_custom_activity("sound healing").unwrap();

    let matches = draft
        .activity_preferences
        .iter()
        .filter(|entry| *entry == "Sound Healing")
        .count();
    assert_eq!(matches, 1);
}

#[test]
fn empty_custom_activity_is_rejected_without_state_change() {
    let mut draft = PropertyDraft::new();
    assert_eq!(draft.add_custom_activity("   "), Err(ActivityError::EmptyInput));
    assert!(draft.activity_preferences.is_empty());
}

#[test]
fn remove_activity_handles_catalog_and_custom_alike() {
    let mut draft = PropertyDraft::new();
    draft.toggle_set_field(SetField::ActivityPreferences, "Yoga", true);
    draft.add_custom_activity("Forest Bathing").unwrap();
    assert_eq!(draft.custom_activities(), vec!["Forest Bathing"]);

    draft.remove_activity("Yoga");
    draft.remove_activity("Forest Bathing");
    assert!(draft.activity_preferences.is_empty());
}

#[test]
fn draft_round_trips_through_persistence() {
    let mut draft = PropertyDraft::new();
    draft.set_field(ScalarField::Title, "Cedar Lodge").unwrap();
    draft.set_field(ScalarField::PropertyType, "lodge").unwrap();
    draft.set_field(ScalarField::PricePerNight, "180").unwrap();
    draft.set_field(ScalarField::Latitude, "39.0968").unwrap();
    draft.toggle_set_field(SetField::Amenities, "Hot Tub", true);
    draft.add_custom_activity("Stargazing").unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    persistence::save_draft_to_file(&draft, file.path()).unwrap();
    let reloaded = persistence::load_draft_from_file(file.path()).unwrap();

    assert_eq!(reloaded.title, "Cedar Lodge");
    assert_eq!(reloaded.property_type, draft.property_type);
    assert_eq!(reloaded.price_per_night, Some(180.0));
    assert_eq!(reloaded.latitude.as_deref(), Some("39.0968"));
    assert_eq!(reloaded.amenities, draft.amenities);
    assert_eq!(reloaded.custom_activities(), vec!["Stargazing"]);
}
