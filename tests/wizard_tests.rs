use listing_core::draft::{PropertyDraft, ScalarField};
use listing_core::wizard::{
    validate_step, StepJumpPolicy, SubmitRejected, SubmitSink, Wizard, WizardError, WizardStep,
    TOTAL_STEPS,
};

fn valid_draft() -> PropertyDraft {
    let mut draft = PropertyDraft::new();
    draft.set_field(ScalarField::Title, "Cedar Lodge").unwrap();
    draft.set_field(ScalarField::PricePerNight, "180").unwrap();
    draft.set_field(ScalarField::Location, "Lake Tahoe").unwrap();
    draft.set_field(ScalarField::PropertyType, "lodge").unwrap();
    draft
}

#[derive(Default)]
struct RecordingSink {
    received: Vec<String>,
}

impl SubmitSink for RecordingSink {
    fn submit(&mut self, draft: &PropertyDraft) -> Result<(), SubmitRejected> {
        self.received.push(draft.title.clone());
        Ok(())
    }
}

#[test]
fn go_next_is_gated_on_each_required_step() {
    let mut wizard = Wizard::new_add();

    // Step 1 requires title and price.
    assert!(wizard.go_next().is_err());
    wizard.draft_mut().set_field(ScalarField::Title, "Cedar Lodge").unwrap();
    assert!(wizard.go_next().is_err());
    wizard.draft_mut().set_field(ScalarField::PricePerNight, "180").unwrap();
    assert_eq!(wizard.go_next().unwrap(), WizardStep::Location);

    // Step 2 requires a location.
    assert!(wizard.go_next().is_err());
    assert_eq!(wizard.step_number(), 2);
    wizard.draft_mut().set_field(ScalarField::Location, "Lake Tahoe").unwrap();
    assert_eq!(wizard.go_next().unwrap(), WizardStep::PropertySpecifics);

    // Step 3 requires a property type.
    assert!(wizard.go_next().is_err());
    wizard.draft_mut().set_field(ScalarField::PropertyType, "cabin").unwrap();
    assert_eq!(wizard.go_next().unwrap(), WizardStep::Amenities);

    // Steps 4 through 6 have no required fields.
    assert_eq!(wizard.go_next().unwrap(), WizardStep::ActivityPreferences);
    assert_eq!(wizard.go_next().unwrap(), WizardStep::ImagesAndActivation);
    assert!(wizard.is_final_step());
}

#[test]
fn validation_failure_names_the_missing_fields() {
    let wizard = Wizard::new_add();
    let err = validate_step(WizardStep::BasicInfo, wizard.draft()).unwrap_err();
    match err {
        WizardError::RequiredFieldMissing { step, fields } => {
            assert_eq!(step, WizardStep::BasicInfo);
            assert_eq!(fields, vec!["title", "price"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn navigation_clamps_at_both_ends() {
    let mut wizard = Wizard::new_edit(valid_draft());
    assert_eq!(wizard.go_previous(), WizardStep::BasicInfo);
    assert_eq!(wizard.step_number(), 1);

    wizard.go_to_step(TOTAL_STEPS).unwrap();
    assert_eq!(wizard.go_next().unwrap(), WizardStep::ImagesAndActivation);
    assert_eq!(wizard.step_number(), TOTAL_STEPS);
}

#[test]
fn add_flow_jumps_are_unrestricted() {
    let mut wizard = Wizard::new_add();
    assert_eq!(wizard.policy(), StepJumpPolicy::Unrestricted);
    // Nothing is filled in, yet the jump lands.
    assert_eq!(
        wizard.go_to_step(5).unwrap(),
        WizardStep::ActivityPreferences
    );
    assert!(wizard.go_to_step(0).is_err());
    assert!(wizard.go_to_step(TOTAL_STEPS + 1).is_err());
}

#[test]
fn edit_flow_revalidates_forward_jumps_in_order() {
    let mut wizard = Wizard::new_edit(valid_draft());
    assert_eq!(wizard.policy(), StepJumpPolicy::SequentialRevalidate);
    assert_eq!(wizard.go_to_step(6).unwrap(), WizardStep::ImagesAndActivation);

    // Invalidate step 1, then jump back and attempt to jump forward again.
    wizard.draft_mut().title.clear();
    assert_eq!(wizard.go_to_step(2).unwrap(), WizardStep::Location);
    let err = wizard.go_to_step(4).unwrap_err();
    match err {
        WizardError::RequiredFieldMissing { step, .. } => {
            assert_eq!(step, WizardStep::BasicInfo)
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(wizard.step_number(), 2);

    // Backward jumps never validate.
    assert_eq!(wizard.go_to_step(1).unwrap(), WizardStep::BasicInfo);
}

#[test]
fn submit_requires_the_final_step() {
    let mut wizard = Wizard::new_edit(valid_draft());
    let mut sink = RecordingSink::default();
    let err = wizard.submit(&mut sink).unwrap_err();
    assert!(matches!(err, WizardError::NotFinalStep { .. }));
    assert!(sink.received.is_empty());

    wizard.go_to_step(TOTAL_STEPS).unwrap();
    wizard.submit(&mut sink).unwrap();
    assert_eq!(sink.received, vec!["Cedar Lodge".to_string()]);
}

#[test]
fn submit_aggregate_check_is_independent_of_step_validators() {
    // Reach the final step via unrestricted jumps, leaving fields empty.
    let mut wizard = Wizard::new_add();
    wizard.go_to_step(TOTAL_STEPS).unwrap();

    let mut sink = RecordingSink::default();
    let err = wizard.submit(&mut sink).unwrap_err();
    match err {
        WizardError::RequiredFieldMissing { fields, .. } => {
            assert_eq!(fields, vec!["title", "location", "type", "price"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(sink.received.is_empty());
}

#[test]
fn failed_submit_surfaces_the_sink_error() {
    struct Rejecting;
    impl SubmitSink for Rejecting {
        fn submit(&mut self, _: &PropertyDraft) -> Result<(), SubmitRejected> {
            Err(SubmitRejected("listing service unavailable".into()))
        }
    }

    let mut wizard = Wizard::new_edit(valid_draft());
    wizard.go_to_step(TOTAL_STEPS).unwrap();
    let err = wizard.submit(&mut Rejecting).unwrap_err();
    assert!(matches!(err, WizardError::Submit(message) if message.contains("unavailable")));
}
