use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header, Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::{Quote, SymbolMatch};
use crate::models::settings::QuoteApiSettings;
use super::traits::QuoteProvider;

const PROVIDER_NAME: &str = "brapi";

/// Maximum number of matches returned by [`BrapiProvider::search_symbols`].
pub const MAX_SEARCH_RESULTS: usize = 20;

/// brapi.dev provider for Brazilian exchange quotes (stocks, FIIs, ETFs, BDRs).
///
/// - **Free tier**: basic quotes work without a token.
/// - **Batching**: many tickers per request, comma-joined in the path.
/// - **Fundamentals**: always disabled (`fundamental=false`).
pub struct BrapiProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
    freshness_secs: u64,
}

impl BrapiProvider {
    pub fn new(settings: &QuoteApiSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            freshness_secs: settings.freshness_secs,
        }
    }

    /// `{base}/quote/{A,B,C}?fundamental=false[&token=...]`
    pub fn quote_url(&self, symbols: &[String]) -> Result<Url, CoreError> {
        let joined = symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .collect::<Vec<_>>()
            .join(",");
        let mut url = self.endpoint(&format!("quote/{joined}"))?;
        url.query_pairs_mut().append_pair("fundamental", "false");
        self.append_token(&mut url);
        Ok(url)
    }

    /// `{base}/available?search=...[&token=...]`
    pub fn search_url(&self, query: &str) -> Result<Url, CoreError> {
        let mut url = self.endpoint("available")?;
        url.query_pairs_mut().append_pair("search", query);
        self.append_token(&mut url);
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, CoreError> {
        Url::parse(&format!("{}/{path}", self.base_url)).map_err(|e| {
            CoreError::Config(format!("Invalid quote API base URL '{}': {e}", self.base_url))
        })
    }

    // Query values go through form encoding, so a token with reserved
    // characters cannot inject extra parameters.
    fn append_token(&self, url: &mut Url) {
        if let Some(token) = &self.token {
            url.query_pairs_mut().append_pair("token", token);
        }
    }

    /// `Cache-Control` value sent with every request.
    pub fn cache_control(&self) -> String {
        format!("max-age={}", self.freshness_secs)
    }

    /// Parse a `/quote` response body. Rows without a usable price are
    /// skipped with a warning rather than failing the whole batch.
    pub fn parse_quotes(body: &str) -> Result<Vec<Quote>, CoreError> {
        let resp: QuoteResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse quote response: {e}"),
        })?;

        debug!(
            "brapi answered {} quote rows (requested at {:?}, took {:?})",
            resp.results.len(),
            resp.requested_at,
            resp.took
        );

        let quotes = resp
            .results
            .into_iter()
            .filter_map(|row| {
                let price = match row.regular_market_price {
                    Some(p) if p.is_finite() && p >= 0.0 => p,
                    other => {
                        warn!("Skipping quote for {}: unusable price {:?}", row.symbol, other);
                        return None;
                    }
                };
                Some(Quote {
                    symbol: row.symbol.to_uppercase(),
                    price,
                    change_percent: row
                        .regular_market_change_percent
                        .filter(|c| c.is_finite())
                        .unwrap_or(0.0),
                    short_name: row.short_name,
                    currency: row.currency,
                    previous_close: row.regular_market_previous_close,
                })
            })
            .collect();

        Ok(quotes)
    }

    /// Parse an `/available` search response, keeping the first
    /// [`MAX_SEARCH_RESULTS`] entries.
    pub fn parse_search(body: &str) -> Result<Vec<SymbolMatch>, CoreError> {
        let resp: AvailableResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse search response: {e}"),
        })?;

        Ok(resp
            .stocks
            .unwrap_or_default()
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(|entry| match entry {
                AvailableEntry::Symbol(symbol) => SymbolMatch {
                    name: symbol.clone(),
                    symbol,
                },
                AvailableEntry::Detailed { symbol, name } => SymbolMatch {
                    name: name.unwrap_or_else(|| symbol.clone()),
                    symbol,
                },
            })
            .collect())
    }

    async fn get_body(&self, url: &str) -> Result<String, CoreError> {
        let resp = self
            .client
            .get(url)
            .header(header::CACHE_CONTROL, self.cache_control())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("HTTP {status}"),
            });
        }

        Ok(resp.text().await?)
    }
}

// ── brapi response types ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    #[serde(default)]
    results: Vec<QuoteRow>,
    requested_at: Option<String>,
    took: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRow {
    symbol: String,
    short_name: Option<String>,
    currency: Option<String>,
    regular_market_price: Option<f64>,
    regular_market_change_percent: Option<f64>,
    regular_market_previous_close: Option<f64>,
}

#[derive(Deserialize)]
struct AvailableResponse {
    stocks: Option<Vec<AvailableEntry>>,
}

/// `/available` has returned both bare ticker strings and objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum AvailableEntry {
    Symbol(String),
    Detailed {
        #[serde(alias = "stock")]
        symbol: String,
        name: Option<String>,
    },
}

#[async_trait]
impl QuoteProvider for BrapiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, CoreError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.quote_url(symbols)?;
        debug!("Fetching {} quotes from brapi", symbols.len());
        let body = self.get_body(url.as_str()).await?;
        Self::parse_quotes(&body)
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, CoreError> {
        let url = self.search_url(query)?;
        let body = self.get_body(url.as_str()).await?;
        Self::parse_search(&body)
    }
}
