// ABOUTME: Integration tests for whole-form validation
// ABOUTME: Covers register-style forms, unknown fields and the serialized result shape

use flashdeck_validation::{
    is_form_valid, validate_form, FormSpec, FormValues, Validator,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn register_form() -> FormSpec {
    FormSpec::new()
        .field(
            "username",
            [
                Validator::Required,
                Validator::MinLength(3),
                Validator::MaxLength(20),
            ],
        )
        .field("email", [Validator::Required, Validator::Email])
        .field("password", [Validator::Required, Validator::MinLength(8)])
}

#[test]
fn test_valid_submission_passes() {
    let values = FormValues::new()
        .with("username", "alice")
        .with("email", "alice@uibk.ac.at")
        .with("password", "correct-horse");

    let result = validate_form(&values, &register_form());

    assert!(is_form_valid(&result));
    assert!(result.messages().is_empty());
    assert_eq!(result.field("username").unwrap().len(), 3);
}

#[test]
fn test_invalid_submission_reports_each_rule() {
    let values = FormValues::new()
        .with("username", "al")
        .with("email", "")
        .with("password", "short");

    let result = validate_form(&values, &register_form());

    assert!(!is_form_valid(&result));
    let messages = result.messages();
    assert_eq!(
        messages["username"],
        vec!["Field must be at least 3 characters long"]
    );
    assert_eq!(messages["email"].len(), 2);
    assert_eq!(
        messages["password"],
        vec!["Field must be at least 8 characters long"]
    );
}

#[test]
fn test_fields_without_rules_are_ignored() {
    let values: FormValues = [("username", "alice"), ("remember", "on")]
        .into_iter()
        .collect();

    let result = validate_form(&values, &register_form());

    assert!(result.field("remember").is_none());
    // Declared fields that were not submitted are not validated either
    assert!(result.field("email").is_none());
    assert!(is_form_valid(&result));
}

#[test]
fn test_absent_value_fails_required() {
    let mut values = FormValues::new();
    values.insert("email", None);

    let result = validate_form(&values, &register_form());

    let email = result.field("email").unwrap();
    assert!(email["required"].error);
    assert!(email["email"].error);
}

#[test]
fn test_result_serializes_as_nested_outcome_map() {
    let form = FormSpec::new().field("name", [Validator::Required, Validator::MaxLength(2)]);
    let values = FormValues::new().with("name", "abc");

    let result = validate_form(&values, &form);

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "name": {
                "required": { "error": false },
                "maxLength": {
                    "error": true,
                    "value": 2,
                    "message": "Field must be at most 2 characters long"
                }
            }
        })
    );
}
