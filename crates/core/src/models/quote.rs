use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point-in-time market quote for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Last traded price
    pub price: f64,

    /// Percent change since the previous close
    pub change_percent: f64,

    pub short_name: Option<String>,
    pub currency: Option<String>,
    pub previous_close: Option<f64>,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: f64, change_percent: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            price,
            change_percent,
            short_name: None,
            currency: None,
            previous_close: None,
        }
    }
}

/// Result of one gateway call, indexed by symbol.
///
/// `upstream_failed` records that the quote service could not be reached
/// (transport error, non-2xx), as opposed to it answering without data for
/// a given symbol. Both cases leave the symbol absent from the set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteSet {
    quotes: HashMap<String, Quote>,
    upstream_failed: bool,
}

impl QuoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes(quotes: impl IntoIterator<Item = Quote>) -> Self {
        let mut set = Self::new();
        set.extend(quotes);
        set
    }

    /// An empty set flagged as a failed upstream call.
    pub fn unavailable() -> Self {
        Self {
            quotes: HashMap::new(),
            upstream_failed: true,
        }
    }

    pub fn insert(&mut self, quote: Quote) {
        self.quotes.insert(quote.symbol.to_uppercase(), quote);
    }

    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) {
        for quote in quotes {
            self.insert(quote);
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(&symbol.trim().to_uppercase())
    }

    pub fn mark_upstream_failed(&mut self) {
        self.upstream_failed = true;
    }

    pub fn upstream_failed(&self) -> bool {
        self.upstream_failed
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.keys().map(String::as_str)
    }

    /// Flatten to a list; ordering is unspecified.
    pub fn into_quotes(self) -> Vec<Quote> {
        self.quotes.into_values().collect()
    }
}

/// A symbol match returned by the quote service's search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
struct CachedQuote {
    quote: Quote,
    fetched_at: DateTime<Utc>,
}

/// Caller-side memo of recently fetched quotes.
///
/// Entries are fresh while younger than the configured window. Stale
/// entries are kept so they can serve as last-known prices when the
/// upstream is down.
#[derive(Debug, Clone, Default)]
pub struct QuoteCache {
    entries: HashMap<String, CachedQuote>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, quote: Quote, fetched_at: DateTime<Utc>) {
        self.entries
            .insert(quote.symbol.to_uppercase(), CachedQuote { quote, fetched_at });
    }

    /// The cached quote if it was fetched within `ttl` of `now`.
    pub fn get_fresh(&self, symbol: &str, now: DateTime<Utc>, ttl: Duration) -> Option<&Quote> {
        self.entries
            .get(&symbol.to_uppercase())
            .filter(|c| now - c.fetched_at < ttl)
            .map(|c| &c.quote)
    }

    /// The cached quote regardless of age.
    pub fn get_any(&self, symbol: &str) -> Option<&Quote> {
        self.entries.get(&symbol.to_uppercase()).map(|c| &c.quote)
    }

    /// When `symbol` was last fetched, if ever.
    pub fn fetched_at(&self, symbol: &str) -> Option<DateTime<Utc>> {
        self.entries.get(&symbol.to_uppercase()).map(|c| c.fetched_at)
    }

    /// Drop entries older than `ttl`. Returns the number removed.
    pub fn prune_stale(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, c| now - c.fetched_at < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
