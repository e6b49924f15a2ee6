use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::{Quote, SymbolMatch};

/// Trait abstraction over a market-quote service.
///
/// Implementations report failures as errors; the
/// [`QuoteGateway`](crate::services::quote_service::QuoteGateway) is the
/// layer that swallows them and degrades to fallback prices.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch current quotes for `symbols` in a single request.
    /// Symbols the service does not know are simply absent from the result.
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, CoreError>;

    /// Look up tickers matching a free-text query.
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, CoreError>;
}
