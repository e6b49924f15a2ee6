use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use std::collections::BTreeSet;

use crate::errors::CoreError;
use crate::models::quote::{Quote, QuoteCache, QuoteSet, SymbolMatch};
use crate::models::settings::QuoteApiSettings;
use crate::providers::brapi::BrapiProvider;
use crate::providers::traits::QuoteProvider;

/// Best-effort access to live quotes.
///
/// One provider call per request at most, no retries. Any provider error is
/// logged and turned into a degraded [`QuoteSet`]: symbols with a stale
/// cached quote get that last-known price, the rest are left out so
/// valuation falls back to average cost.
///
/// Cache strategy:
/// - Quotes younger than the freshness window are served locally.
/// - Only missing/stale symbols are requested, in one batch.
pub struct QuoteGateway {
    provider: Box<dyn QuoteProvider>,
    cache: QuoteCache,
    freshness: Duration,
}

impl QuoteGateway {
    pub fn new(provider: Box<dyn QuoteProvider>, freshness: Duration) -> Self {
        Self {
            provider,
            cache: QuoteCache::new(),
            freshness,
        }
    }

    /// Gateway backed by brapi, configured from settings.
    pub fn from_settings(settings: &QuoteApiSettings) -> Result<Self, CoreError> {
        let freshness = settings.freshness()?;
        Ok(Self::new(Box::new(BrapiProvider::new(settings)), freshness))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch quotes for `symbols` as of now. Never fails.
    pub async fn fetch_quotes(&mut self, symbols: &[String]) -> QuoteSet {
        self.fetch_quotes_at(symbols, Utc::now()).await
    }

    /// Same as [`fetch_quotes`](Self::fetch_quotes) with an explicit clock.
    pub async fn fetch_quotes_at(&mut self, symbols: &[String], now: DateTime<Utc>) -> QuoteSet {
        let wanted: BTreeSet<String> = symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        let mut set = QuoteSet::new();
        if wanted.is_empty() {
            return set;
        }

        let mut missing = Vec::new();
        for symbol in wanted {
            match self.cache.get_fresh(&symbol, now, self.freshness) {
                Some(quote) => set.insert(quote.clone()),
                None => missing.push(symbol),
            }
        }

        if missing.is_empty() {
            debug!("All {} quotes served from cache", set.len());
            return set;
        }

        match self.provider.fetch_quotes(&missing).await {
            Ok(quotes) => {
                debug!(
                    "{} returned {} of {} requested quotes",
                    self.provider.name(),
                    quotes.len(),
                    missing.len()
                );
                for quote in quotes {
                    self.cache.insert(quote.clone(), now);
                    set.insert(quote);
                }
            }
            Err(e) => {
                warn!(
                    "Quote fetch from {} failed for {} symbols: {e}",
                    self.provider.name(),
                    missing.len()
                );
                set.mark_upstream_failed();
                for symbol in &missing {
                    if let Some(quote) = self.cache.get_any(symbol) {
                        debug!("Serving last-known quote for {symbol}");
                        set.insert(quote.clone());
                    }
                }
            }
        }

        set
    }

    /// Quote for a single ticker, if one is available.
    pub async fn fetch_quote(&mut self, symbol: &str) -> Option<Quote> {
        let set = self.fetch_quotes(&[symbol.to_string()]).await;
        set.get(symbol).cloned()
    }

    /// Ticker search. Failures yield an empty list.
    pub async fn search_symbols(&self, query: &str) -> Vec<SymbolMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.provider.search_symbols(query).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Symbol search on {} failed: {e}", self.provider.name());
                Vec::new()
            }
        }
    }

    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /// Drop cached quotes older than the freshness window.
    pub fn prune_cache(&mut self, now: DateTime<Utc>) -> usize {
        self.cache.prune_stale(now, self.freshness)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
