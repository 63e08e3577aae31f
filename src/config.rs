use dotenv::dotenv;
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::error::{BbbError, Result};

pub const API_URL_VAR: &str = "BBB_API_URL";
pub const SECRET_VAR: &str = "BBB_SECRET";
pub const TIMEOUT_VAR: &str = "BBB_TIMEOUT_SECS";

/// Connection settings for a BigBlueButton server.
///
/// `api_url` is the full API base including the trailing `api/`, e.g.
/// `https://bbb.example.com/bigbluebutton/api/`.
#[derive(Clone)]
pub struct BbbConfig {
    pub api_url: String,
    pub secret: String,
    /// Applied to calls that don't carry their own timeout
    pub default_timeout: Option<Duration>,
}

impl BbbConfig {
    pub fn new(api_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_url: normalize_api_url(api_url.into()),
            secret: secret.into(),
            default_timeout: None,
        }
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Load the configuration from environment variables (and `.env`)
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| BbbError::missing_var(API_URL_VAR))?;
        let secret = lookup(SECRET_VAR)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| BbbError::missing_var(SECRET_VAR))?;

        let mut config = Self::new(api_url.trim(), secret);
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.default_timeout = Some(parse_timeout_secs(&raw)?);
        }

        debug!("Loaded BigBlueButton config: {:?}", config);
        Ok(config)
    }
}

impl fmt::Debug for BbbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BbbConfig")
            .field("api_url", &self.api_url)
            .field("secret", &"<redacted>")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

/// Parse a positive number of seconds
pub fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|err: std::num::ParseIntError| {
        BbbError::InvalidTimeout {
            value: raw.to_string(),
            reason: err.to_string(),
        }
    })?;

    if secs == 0 {
        return Err(BbbError::InvalidTimeout {
            value: raw.to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }

    Ok(Duration::from_secs(secs))
}

fn normalize_api_url(mut api_url: String) -> String {
    if !api_url.ends_with('/') {
        api_url.push('/');
    }
    api_url
}
