// ABOUTME: Form validation engine for Flashdeck forms
// ABOUTME: Named validators produce per-rule outcomes that are merged per field

pub mod form;
pub mod validators;

pub use form::{
    is_form_valid, validate_field, validate_form, FieldOutcomes, FormSpec, FormValues,
    ValidationResult,
};
pub use validators::{
    email, max_length, min_length, required, Outcome, Validator, ValidatorParseError,
};
