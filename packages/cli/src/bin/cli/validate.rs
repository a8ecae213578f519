// ABOUTME: CLI command running form values through the validation engine
// ABOUTME: Prints the per-field outcome map as JSON and lists failing rules

use anyhow::{bail, Result};
use clap::Args;
use colored::*;
use flashdeck_cli::forms::{form_from_rules, form_values, parse_pair, parse_rule};
use flashdeck_validation::{validate_form, Validator};

#[derive(Args)]
pub struct ValidateArgs {
    /// Submitted field as name=value
    #[arg(long = "field", value_parser = parse_pair)]
    fields: Vec<(String, String)>,

    /// Rule as field=validator (required, email, minLength:N, maxLength:N)
    #[arg(long = "rule", value_parser = parse_rule, required = true)]
    rules: Vec<(String, Validator)>,
}

impl ValidateArgs {
    pub fn execute(self) -> Result<()> {
        let form = form_from_rules(&self.rules);
        let values = form_values(&self.fields, &form);
        let result = validate_form(&values, &form);

        println!("{}", serde_json::to_string_pretty(&result)?);

        if result.is_valid() {
            eprintln!("{} Form is valid", "✓".green().bold());
            return Ok(());
        }

        for (field, messages) in result.messages() {
            for message in messages {
                eprintln!("{} {}: {}", "✗".red().bold(), field, message);
            }
        }
        bail!("Form is invalid")
    }
}
