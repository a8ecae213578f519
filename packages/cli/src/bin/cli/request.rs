// ABOUTME: CLI command sending an arbitrary call through the session-aware pipeline
// ABOUTME: Prints the response body as pretty JSON; failures exit non-zero

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::*;
use flashdeck_cli::build_client;
use flashdeck_cli::config::Config;
use flashdeck_cli::forms::parse_pair;
use flashdeck_client::{ApiResponse, Method, RequestDescriptor};
use serde_json::Value;

#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT or DELETE)
    method: String,

    /// API path, e.g. /api/decks
    path: String,

    /// Query parameter as name=value, appended in the order given
    #[arg(long = "param", value_parser = parse_pair)]
    params: Vec<(String, String)>,

    /// JSON request body
    #[arg(long, conflicts_with = "form")]
    json: Option<String>,

    /// Multipart form field as name=value
    #[arg(long, value_parser = parse_pair)]
    form: Vec<(String, String)>,
}

impl RequestArgs {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let method: Method = self.method.parse()?;
        let client = build_client(config)?;

        let mut request = RequestDescriptor::new(method, client.endpoint(&self.path));
        for (name, value) in self.params {
            request = request.param(name, value);
        }
        if let Some(json) = self.json {
            let body: Value = serde_json::from_str(&json).context("--json is not valid JSON")?;
            request = request.json(body);
        } else if !self.form.is_empty() {
            request = request.multipart(self.form);
        }

        match client.fetching(request).await? {
            ApiResponse::Success(response) => {
                println!("{}", serde_json::to_string_pretty(response.body())?);
                Ok(())
            }
            ApiResponse::Failure(response) => {
                println!("{}", serde_json::to_string_pretty(response.body())?);
                bail!(
                    "Request failed: {}",
                    response.message().unwrap_or("no message")
                );
            }
            ApiResponse::SessionExpired => bail!("Session expired"),
        }
    }
}
