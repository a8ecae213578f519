// ABOUTME: Form definitions and argument parsers for the command line
// ABOUTME: Login form rules plus `name=value` and `field=validator` parsing for clap

use flashdeck_validation::{FormSpec, FormValues, Validator};

pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";

/// Rules checked before credentials are sent to the server
pub fn login_form() -> FormSpec {
    FormSpec::new()
        .field(USERNAME_FIELD, [Validator::Required])
        .field(PASSWORD_FIELD, [Validator::Required])
}

pub fn login_values(username: &str, password: &str) -> FormValues {
    FormValues::new()
        .with(USERNAME_FIELD, username)
        .with(PASSWORD_FIELD, password)
}

/// Parse a `name=value` argument. The value may be empty or contain `=`.
pub fn parse_pair(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{}'", arg)),
    }
}

/// Parse a `field=validator` argument such as `password=minLength:8`
pub fn parse_rule(arg: &str) -> Result<(String, Validator), String> {
    let (field, rule) = parse_pair(arg)?;
    let validator = rule.parse::<Validator>().map_err(|e| e.to_string())?;
    Ok((field, validator))
}

/// Collect rules into a form, keeping the order rules were given per field
pub fn form_from_rules(rules: &[(String, Validator)]) -> FormSpec {
    let mut form = FormSpec::new();
    for (field, validator) in rules {
        form.push(field.clone(), *validator);
    }
    form
}

/// Submitted values, with every ruled field missing from `fields` submitted
/// as absent
pub fn form_values(fields: &[(String, String)], form: &FormSpec) -> FormValues {
    let mut values: FormValues = fields.iter().cloned().collect();
    for name in form.field_names() {
        if values.get(name).is_none() {
            values.insert(name, None);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_validation::validate_form;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("limit=10", ("limit", "10"))]
    #[case("q=a=b", ("q", "a=b"))]
    #[case("empty=", ("empty", ""))]
    fn test_parse_pair(#[case] arg: &str, #[case] expected: (&str, &str)) {
        assert_eq!(
            parse_pair(arg).unwrap(),
            (expected.0.to_string(), expected.1.to_string())
        );
    }

    #[rstest]
    #[case("novalue")]
    #[case("=value")]
    fn test_parse_pair_rejects(#[case] arg: &str) {
        assert!(parse_pair(arg).is_err());
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!(
            parse_rule("password=minLength:8").unwrap(),
            ("password".to_string(), Validator::MinLength(8))
        );
        assert!(parse_rule("password=strong").is_err());
    }

    #[test]
    fn test_login_form_requires_both_fields() {
        let result = validate_form(&login_values("alice", ""), &login_form());
        assert!(!result.is_valid());
        assert_eq!(
            result.messages().get(PASSWORD_FIELD),
            Some(&vec!["Field is required"])
        );

        let result = validate_form(&login_values("alice", "secret"), &login_form());
        assert!(result.is_valid());
    }

    #[test]
    fn test_form_values_fill_missing_fields() {
        let form = form_from_rules(&[
            ("email".to_string(), Validator::Required),
            ("email".to_string(), Validator::Email),
            ("name".to_string(), Validator::Required),
        ]);
        assert_eq!(form.validators("email"), &[Validator::Required, Validator::Email]);

        let values = form_values(&[("email".to_string(), "a@b.io".to_string())], &form);
        let result = validate_form(&values, &form);

        assert!(!result.is_valid());
        assert!(result.messages().contains_key("name"));
        assert!(!result.messages().contains_key("email"));
    }
}
