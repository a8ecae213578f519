// ABOUTME: Validator primitives for form fields
// ABOUTME: Each validator owns one named key in a field's outcome set

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Deliberately loose email shape: one `@`, dotted domain, 2-4 char final label.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.\-]+@([a-zA-Z0-9\-]+\.)+([a-zA-Z0-9]{2,4})+$")
        .expect("email pattern is a valid regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidatorParseError {
    #[error("Unknown validator: {0}")]
    UnknownValidator(String),

    #[error("Validator {0} requires a length argument, e.g. {0}:8")]
    MissingArgument(String),

    #[error("Invalid length argument for {0}: {1}")]
    InvalidArgument(String, String),
}

/// Result of one validator applied to one value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Bound parameter of a failing length validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<usize>,
}

impl Outcome {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: Some(message.into()),
            value: None,
        }
    }

    fn with_value(mut self, value: usize) -> Self {
        self.value = Some(value);
        self
    }
}

/// Fails when the value is absent or empty
pub fn required(value: Option<&str>) -> Outcome {
    match value {
        None | Some("") => Outcome::failed("Field is required"),
        Some(_) => Outcome::ok(),
    }
}

/// Fails when the value is absent or shorter than `min` characters
pub fn min_length(min: usize, value: Option<&str>) -> Outcome {
    match value {
        Some(v) if v.chars().count() >= min => Outcome::ok(),
        _ => Outcome::failed(format!("Field must be at least {} characters long", min))
            .with_value(min),
    }
}

/// Fails when the value is absent or longer than `max` characters
pub fn max_length(max: usize, value: Option<&str>) -> Outcome {
    match value {
        Some(v) if v.chars().count() <= max => Outcome::ok(),
        _ => Outcome::failed(format!("Field must be at most {} characters long", max))
            .with_value(max),
    }
}

/// Fails when the value is absent or does not look like an email address
pub fn email(value: Option<&str>) -> Outcome {
    match value {
        Some(v) if EMAIL_PATTERN.is_match(v) => Outcome::ok(),
        _ => Outcome::failed("Field must be a valid email address for example: test@gmail.com"),
    }
}

/// A named validation rule, with its parameter bound at construction.
///
/// Textual form is the rule name, optionally followed by `:` and the bound
/// length (`required`, `email`, `minLength:8`, `maxLength:30`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
}

impl Validator {
    /// Key this validator owns in a field's outcome set
    pub fn name(&self) -> &'static str {
        match self {
            Validator::Required => "required",
            Validator::MinLength(_) => "minLength",
            Validator::MaxLength(_) => "maxLength",
            Validator::Email => "email",
        }
    }

    pub fn check(&self, value: Option<&str>) -> Outcome {
        match *self {
            Validator::Required => required(value),
            Validator::MinLength(min) => min_length(min, value),
            Validator::MaxLength(max) => max_length(max, value),
            Validator::Email => email(value),
        }
    }

    /// Outcome set holding this validator's single key
    pub fn apply(&self, value: Option<&str>) -> BTreeMap<String, Outcome> {
        BTreeMap::from([(self.name().to_string(), self.check(value))])
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::MinLength(n) | Validator::MaxLength(n) => write!(f, "{}:{}", self.name(), n),
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for Validator {
    type Err = ValidatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };

        let length = |name: &str| -> Result<usize, ValidatorParseError> {
            let arg = arg.ok_or_else(|| ValidatorParseError::MissingArgument(name.to_string()))?;
            arg.parse::<usize>()
                .map_err(|_| ValidatorParseError::InvalidArgument(name.to_string(), arg.to_string()))
        };

        match name {
            "required" => Ok(Validator::Required),
            "email" => Ok(Validator::Email),
            "minLength" => Ok(Validator::MinLength(length(name)?)),
            "maxLength" => Ok(Validator::MaxLength(length(name)?)),
            _ => Err(ValidatorParseError::UnknownValidator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, true)]
    #[case(Some(""), true)]
    #[case(Some(" "), false)]
    #[case(Some("deck"), false)]
    fn test_required(#[case] value: Option<&str>, #[case] error: bool) {
        assert_eq!(required(value).error, error);
    }

    #[rstest]
    #[case(3, None, true)]
    #[case(3, Some(""), true)]
    #[case(3, Some("ab"), true)]
    #[case(3, Some("abc"), false)]
    #[case(0, Some(""), false)]
    fn test_min_length(#[case] min: usize, #[case] value: Option<&str>, #[case] error: bool) {
        assert_eq!(min_length(min, value).error, error);
    }

    #[rstest]
    #[case(3, None, true)]
    #[case(3, Some("abcd"), true)]
    #[case(3, Some("abc"), false)]
    #[case(3, Some(""), false)]
    fn test_max_length(#[case] max: usize, #[case] value: Option<&str>, #[case] error: bool) {
        assert_eq!(max_length(max, value).error, error);
    }

    #[test]
    fn test_length_failures_carry_bound_and_message() {
        let outcome = min_length(8, Some("short"));
        assert_eq!(outcome.value, Some(8));
        assert_eq!(
            outcome.message.as_deref(),
            Some("Field must be at least 8 characters long")
        );

        let outcome = max_length(4, Some("too long"));
        assert_eq!(outcome.value, Some(4));
        assert!(outcome.message.unwrap().contains('4'));

        assert_eq!(min_length(2, Some("ok")), Outcome::ok());
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(!max_length(4, Some("ÄÖÜß")).error);
        assert!(min_length(5, Some("ÄÖÜß")).error);
    }

    #[rstest]
    #[case(Some("a@b.co"), false)]
    #[case(Some("test@gmail.com"), false)]
    #[case(Some("first.last-1@mail.uibk.ac.at"), false)]
    #[case(Some("not-an-email"), true)]
    #[case(Some("missing@tld"), true)]
    #[case(Some("two@@signs.com"), true)]
    #[case(Some("space in@mail.com"), true)]
    #[case(Some(""), true)]
    #[case(None, true)]
    fn test_email(#[case] value: Option<&str>, #[case] error: bool) {
        assert_eq!(email(value).error, error);
    }

    #[test]
    fn test_apply_owns_single_key() {
        let outcomes = Validator::MinLength(5).apply(Some("abc"));
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes["minLength"].error);

        let outcomes = Validator::Required.apply(Some("abc"));
        assert!(!outcomes["required"].error);
    }

    #[rstest]
    #[case("required", Validator::Required)]
    #[case("email", Validator::Email)]
    #[case("minLength:8", Validator::MinLength(8))]
    #[case("maxLength: 30", Validator::MaxLength(30))]
    fn test_parse_validator(#[case] input: &str, #[case] expected: Validator) {
        assert_eq!(input.parse::<Validator>().unwrap(), expected);
    }

    #[test]
    fn test_parse_validator_errors() {
        assert_eq!(
            "minLength".parse::<Validator>(),
            Err(ValidatorParseError::MissingArgument("minLength".to_string()))
        );
        assert!(matches!(
            "maxLength:many".parse::<Validator>(),
            Err(ValidatorParseError::InvalidArgument(_, _))
        ));
        assert!(matches!(
            "pattern".parse::<Validator>(),
            Err(ValidatorParseError::UnknownValidator(_))
        ));
    }

    #[test]
    fn test_display_matches_parse_form() {
        assert_eq!(Validator::MinLength(8).to_string(), "minLength:8");
        assert_eq!(Validator::Email.to_string(), "email");
    }
}
