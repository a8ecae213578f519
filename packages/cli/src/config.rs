use flashdeck_core::constants::{FLASHDECK_API_URL, FLASHDECK_HOME};
use flashdeck_core::flashdeck_dir;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API URL (expected http:// or https://): {0}")]
    InvalidApiUrl(String),
    #[error("{0} is set but empty")]
    EmptyDataDir(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var(FLASHDECK_API_URL)
            .map(|url| url.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        let data_dir = match env::var(FLASHDECK_HOME) {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::EmptyDataDir(FLASHDECK_HOME))
            }
            Ok(dir) => PathBuf::from(dir),
            Err(_) => flashdeck_dir(),
        };

        Ok(Config { api_url, data_dir })
    }
}
