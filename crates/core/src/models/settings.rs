use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const DEFAULT_QUOTE_BASE_URL: &str = "https://brapi.dev/api";

/// Upper bound for `quote_api.freshness_secs` (one day).
pub const MAX_FRESHNESS_SECS: u64 = 86_400;

/// Upper bound for `quote_api.timeout_secs`.
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// User/deployment configuration. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display currency for all monetary values (e.g., "BRL").
    pub default_currency: String,

    /// Length of "top holdings" lists.
    pub top_n: usize,

    /// How many upcoming fixed-income maturities to list.
    pub upcoming_maturities: usize,

    pub quote_api: QuoteApiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: "BRL".to_string(),
            top_n: 5,
            upcoming_maturities: 3,
            quote_api: QuoteApiSettings::default(),
        }
    }
}

/// Connection settings for the market-quote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteApiSettings {
    pub base_url: String,

    /// Optional API token; basic usage works without one.
    pub token: Option<String>,

    /// Quotes younger than this are served from the local cache and
    /// advertised to intermediaries via `Cache-Control: max-age`.
    pub freshness_secs: u64,

    /// Transport timeout for a single quote request.
    pub timeout_secs: u64,
}

impl Default for QuoteApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_QUOTE_BASE_URL.to_string(),
            token: None,
            freshness_secs: 300,
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let currency = self.default_currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::Config(format!(
                "Invalid currency code '{}': must be exactly 3 ASCII letters (e.g., BRL, USD)",
                self.default_currency
            )));
        }
        if self.quote_api.base_url.trim().is_empty() {
            return Err(CoreError::Config("Quote API base URL must not be empty".into()));
        }
        if self.quote_api.freshness_secs == 0 {
            return Err(CoreError::Config("Quote freshness window must be positive".into()));
        }
        if self.quote_api.freshness_secs > MAX_FRESHNESS_SECS {
            return Err(CoreError::Config(format!(
                "Quote freshness window of {}s exceeds the {MAX_FRESHNESS_SECS}s limit",
                self.quote_api.freshness_secs
            )));
        }
        if self.quote_api.timeout_secs == 0 {
            return Err(CoreError::Config("Quote API timeout must be positive".into()));
        }
        if self.quote_api.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(CoreError::Config(format!(
                "Quote API timeout of {}s exceeds the {MAX_TIMEOUT_SECS}s limit",
                self.quote_api.timeout_secs
            )));
        }
        Ok(())
    }
}

impl QuoteApiSettings {
    /// The freshness window as a duration. Fails instead of wrapping or
    /// panicking when the seconds count does not fit.
    pub fn freshness(&self) -> Result<Duration, CoreError> {
        i64::try_from(self.freshness_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "Quote freshness window of {}s is out of range",
                    self.freshness_secs
                ))
            })
    }
}
