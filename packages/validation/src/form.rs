// ABOUTME: Form-level aggregation of validator outcomes
// ABOUTME: Merges per-rule outcomes by key into a per-field validation result

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::validators::{Outcome, Validator};

/// Outcomes of every validator bound to one field, keyed by validator name
pub type FieldOutcomes = BTreeMap<String, Outcome>;

/// Mapping from field name to its ordered list of validators
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSpec {
    fields: BTreeMap<String, Vec<Validator>>,
}

impl FormSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind validators to a field, replacing any earlier binding
    pub fn field(
        mut self,
        name: impl Into<String>,
        validators: impl IntoIterator<Item = Validator>,
    ) -> Self {
        self.fields
            .insert(name.into(), validators.into_iter().collect());
        self
    }

    /// Append a single validator to a field's list
    pub fn push(&mut self, name: impl Into<String>, validator: Validator) {
        self.fields.entry(name.into()).or_default().push(validator);
    }

    pub fn validators(&self, field: &str) -> &[Validator] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Submitted field values in submission order.
///
/// A field submitted twice keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(String, Option<String>)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FormValues::new();
        for (name, value) in iter {
            values.insert(name, Some(value.into()));
        }
        values
    }
}

/// Per-field, per-rule outcomes of a form validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    fields: BTreeMap<String, FieldOutcomes>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldOutcomes> {
        self.fields.get(name)
    }

    /// Insert or replace one field's outcomes
    pub fn set_field(&mut self, name: impl Into<String>, outcomes: FieldOutcomes) {
        self.fields.insert(name.into(), outcomes);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOutcomes)> {
        self.fields.iter().map(|(name, outcomes)| (name.as_str(), outcomes))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        is_form_valid(self)
    }

    /// Messages of failing rules, grouped by field
    pub fn messages(&self) -> BTreeMap<&str, Vec<&str>> {
        self.fields
            .iter()
            .filter_map(|(field, outcomes)| {
                let messages: Vec<&str> = outcomes
                    .values()
                    .filter(|outcome| outcome.error)
                    .filter_map(|outcome| outcome.message.as_deref())
                    .collect();
                (!messages.is_empty()).then_some((field.as_str(), messages))
            })
            .collect()
    }
}

/// Run every validator bound to `field` against `value`, merging each outcome
/// into `accumulator[field]`. A later validator overwrites an identical key.
pub fn validate_field(
    field: &str,
    value: Option<&str>,
    form: &FormSpec,
    accumulator: &mut ValidationResult,
) {
    for validator in form.validators(field) {
        accumulator
            .fields
            .entry(field.to_string())
            .or_default()
            .extend(validator.apply(value));
    }
}

/// Validate every submitted field against its bound validators.
///
/// Fields without validators in `form` do not appear in the result.
pub fn validate_form(values: &FormValues, form: &FormSpec) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (field, value) in values.iter() {
        validate_field(field, value, form, &mut result);
    }
    debug!(
        "Validated {} submitted fields, {} with rules",
        values.len(),
        result.fields.len()
    );
    result
}

/// True iff no outcome of any field reports an error (vacuously true)
pub fn is_form_valid(result: &ValidationResult) -> bool {
    result
        .fields
        .values()
        .all(|outcomes| outcomes.values().all(|outcome| !outcome.error))
}
