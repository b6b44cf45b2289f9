//! In-progress property draft: the single source of truth a wizard
//! session edits, with field-scoped mutation helpers.

pub mod property;

pub use property::{
    ActivityError, FieldError, PropertyDraft, ScalarField, SetField,
};
