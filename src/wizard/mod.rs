//! Multi-step property wizard: a fixed, ordered sequence of named steps
//! with validation-gated forward progress.
//!
//! The add flow and the edit flow share this controller and differ only in
//! their [`StepJumpPolicy`].

use std::fmt;

use thiserror::Error;

use crate::draft::PropertyDraft;

/// Number of steps in the property wizard.
pub const TOTAL_STEPS: usize = 6;

/// The ordered wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BasicInfo,
    Location,
    PropertySpecifics,
    Amenities,
    ActivityPreferences,
    ImagesAndActivation,
}

impl WizardStep {
    pub const ALL: [WizardStep; TOTAL_STEPS] = [
        WizardStep::BasicInfo,
        WizardStep::Location,
        WizardStep::PropertySpecifics,
        WizardStep::Amenities,
        WizardStep::ActivityPreferences,
        WizardStep::ImagesAndActivation,
    ];

    /// 1-based position in the sequence.
    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|step| step == self)
            .map(|index| index + 1)
            .unwrap_or(1)
    }

    pub fn from_number(number: usize) -> Option<WizardStep> {
        (1..=TOTAL_STEPS)
            .contains(&number)
            .then(|| Self::ALL[number - 1])
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Information",
            WizardStep::Location => "Location",
            WizardStep::PropertySpecifics => "Property Specifics",
            WizardStep::Amenities => "Amenities",
            WizardStep::ActivityPreferences => "Activity Preferences",
            WizardStep::ImagesAndActivation => "Images & Activation",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.title(), self.number(), TOTAL_STEPS)
    }
}

/// How direct jumps are guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepJumpPolicy {
    /// Add flow: the step indicator jumps anywhere, no guard.
    Unrestricted,
    /// Edit flow: jumping forward re-validates every step before the
    /// target, in order, aborting unchanged at the first failure.
    SequentialRevalidate,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("{step}: required field(s) missing: {}", fields.join(", "))]
    RequiredFieldMissing {
        step: WizardStep,
        fields: Vec<&'static str>,
    },
    #[error("Step {number} is out of range (1..={TOTAL_STEPS})")]
    StepOutOfRange { number: usize },
    #[error("Submit is only available from the final step (currently on {current})")]
    NotFinalStep { current: WizardStep },
    #[error("Submission failed: {0}")]
    Submit(String),
}

/// Receives the finished draft snapshot. Mock implementations may log and
/// redirect; the wizard treats the sink as opaque.
pub trait SubmitSink {
    fn submit(&mut self, draft: &PropertyDraft) -> Result<(), SubmitRejected>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SubmitRejected(pub String);

/// Per-step validation. Steps 4 through 6 have no required fields.
pub fn validate_step(step: WizardStep, draft: &PropertyDraft) -> Result<(), WizardError> {
    let mut fields: Vec<&'static str> = Vec::new();
    match step {
        WizardStep::BasicInfo => {
            if draft.title.trim().is_empty() {
                fields.push("title");
            }
            if !draft.price_per_night.is_some_and(|price| price > 0.0) {
                fields.push("price");
            }
        }
        WizardStep::Location => {
            if draft.location.trim().is_empty() {
                fields.push("location");
            }
        }
        WizardStep::PropertySpecifics => {
            if draft.property_type.is_none() {
                fields.push("type");
            }
        }
        WizardStep::Amenities
        | WizardStep::ActivityPreferences
        | WizardStep::ImagesAndActivation => {}
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(WizardError::RequiredFieldMissing { step, fields })
    }
}

/// Drives one wizard session over one [`PropertyDraft`].
#[derive(Debug, Clone)]
pub struct Wizard {
    step: usize,
    policy: StepJumpPolicy,
    draft: PropertyDraft,
}

impl Wizard {
    /// Fresh add-flow session: empty draft, unrestricted jumps.
    pub fn new_add() -> Self {
        Self {
            step: 1,
            policy: StepJumpPolicy::Unrestricted,
            draft: PropertyDraft::new(),
        }
    }

    /// Edit-flow session prefilled from an existing draft. Forward jumps
    /// re-validate sequentially.
    pub fn new_edit(draft: PropertyDraft) -> Self {
        Self {
            step: 1,
            policy: StepJumpPolicy::SequentialRevalidate,
            draft,
        }
    }

    pub fn policy(&self) -> StepJumpPolicy {
        self.policy
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::ALL[self.step - 1]
    }

    pub fn step_number(&self) -> usize {
        self.step
    }

    pub fn is_final_step(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PropertyDraft {
        &mut self.draft
    }

    pub fn validate_current(&self) -> Result<(), WizardError> {
        validate_step(self.current_step(), &self.draft)
    }

    /// Validates the current step, then advances. Clamped at the final
    /// step; a validation failure leaves the position unchanged.
    pub fn go_next(&mut self) -> Result<WizardStep, WizardError> {
        self.validate_current()?;
        if self.step < TOTAL_STEPS {
            self.step += 1;
        }
        Ok(self.current_step())
    }

    /// Steps backward without validation. Clamped at step 1.
    pub fn go_previous(&mut self) -> WizardStep {
        if self.step > 1 {
            self.step -= 1;
        }
        self.current_step()
    }

    /// Direct jump, guarded by the session's [`StepJumpPolicy`].
    pub fn go_to_step(&mut self, number: usize) -> Result<WizardStep, WizardError> {
        if WizardStep::from_number(number).is_none() {
            return Err(WizardError::StepOutOfRange { number });
        }
        match self.policy {
            StepJumpPolicy::Unrestricted => {}
            StepJumpPolicy::SequentialRevalidate => {
                if number > self.step {
                    for earlier in 1..number {
                        let step = WizardStep::ALL[earlier - 1];
                        validate_step(step, &self.draft)?;
                    }
                }
            }
        }
        self.step = number;
        Ok(self.current_step())
    }

    /// Hands the finished draft to the submit collaborator. Only callable
    /// from the final step; runs a coarser aggregate presence check that
    /// is independent of the per-step validators.
    pub fn submit<S: SubmitSink>(&self, sink: &mut S) -> Result<(), WizardError> {
        if !self.is_final_step() {
            return Err(WizardError::NotFinalStep {
                current: self.current_step(),
            });
        }
        let mut fields: Vec<&'static str> = Vec::new();
        if self.draft.title.trim().is_empty() {
            fields.push("title");
        }
        if self.draft.location.trim().is_empty() {
            fields.push("location");
        }
        if self.draft.property_type.is_none() {
            fields.push("type");
        }
        if self.draft.price_per_night.is_none() {
            fields.push("price");
        }
        if !fields.is_empty() {
            return Err(WizardError::RequiredFieldMissing {
                step: self.current_step(),
                fields,
            });
        }
        sink.submit(&self.draft)
            .map_err(|err| WizardError::Submit(err.0))?;
        tracing::info!(title = %self.draft.title, "property draft submitted");
        Ok(())
    }
}
