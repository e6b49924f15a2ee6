pub mod data;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::{DateTime, NaiveDate, Utc};
use data::source::FinanceDataSource;
use log::warn;
use models::{
    cash_flow::CashFlowReport,
    holding::{FixedIncomeHolding, VariableIncomeHolding},
    net_worth::{Goal, SavingsBox},
    overview::{BudgetReport, PortfolioOverview, ReserveReport},
    quote::{QuoteSet, SymbolMatch},
    settings::{QuoteApiSettings, Settings},
};
use providers::traits::QuoteProvider;
use services::{
    aggregation_service::{upcoming_maturities, AggregationService},
    net_worth_service::{goals_total, savings_total, NetWorthService},
    quote_service::QuoteGateway,
    report_service::{check_span, month_bounds, months_back, ReportService},
    reserve_service::ReserveService,
    valuation_service::ValuationService,
};

use errors::CoreError;

/// Main entry point for the finance-tracker core library.
///
/// Each report method is one request-scoped pass: concurrent reads from the
/// data source (and the quote service), then synchronous aggregation over
/// the in-memory results. Nothing is persisted; the only state carried
/// between calls is the quote cache.
#[must_use]
pub struct FinanceTracker {
    settings: Settings,
    quote_gateway: QuoteGateway,
    valuation_service: ValuationService,
    aggregation_service: AggregationService,
    net_worth_service: NetWorthService,
    reserve_service: ReserveService,
    report_service: ReportService,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("settings", &self.settings)
            .field("quote_provider", &self.quote_gateway.provider_name())
            .field("cached_quotes", &self.quote_gateway.cache().len())
            .finish()
    }
}

impl FinanceTracker {
    /// Create a tracker quoting through brapi with the given settings.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let gateway = QuoteGateway::from_settings(&settings.quote_api)?;
        Ok(Self::build(settings, gateway))
    }

    /// Create a tracker with a custom quote provider.
    pub fn with_provider(
        settings: Settings,
        provider: Box<dyn QuoteProvider>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let freshness = settings.quote_api.freshness()?;
        Ok(Self::build(settings, QuoteGateway::new(provider, freshness)))
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Load holdings and balances, fetch quotes, and value everything.
    ///
    /// The five reads (four entity reads plus tickers → quotes) run
    /// concurrently; valuation starts once all of them are in.
    pub async fn portfolio_overview(
        &mut self,
        source: &dyn FinanceDataSource,
        now: DateTime<Utc>,
    ) -> PortfolioOverview {
        let gateway = &mut self.quote_gateway;
        let (variable, fixed, boxes, goals, quotes) = tokio::join!(
            source.variable_holdings(),
            source.fixed_holdings(),
            source.savings_boxes(),
            source.goals(),
            async {
                let tickers = or_empty(source.tracked_tickers().await, source.name(), "tickers");
                gateway.fetch_quotes_at(&tickers, now).await
            },
        );

        let variable = keep_valid(
            or_empty(variable, source.name(), "variable-income holdings"),
            VariableIncomeHolding::validate,
        );
        let fixed = keep_valid(
            or_empty(fixed, source.name(), "fixed-income holdings"),
            FixedIncomeHolding::validate,
        );
        let boxes = or_empty(boxes, source.name(), "savings boxes");
        let goals = or_empty(goals, source.name(), "goals");

        self.value_portfolio(&variable, &fixed, &quotes, &boxes, &goals, now)
    }

    /// The synchronous half of [`portfolio_overview`](Self::portfolio_overview):
    /// valuation → aggregation → net worth over already-loaded records.
    pub fn value_portfolio(
        &self,
        variable: &[VariableIncomeHolding],
        fixed: &[FixedIncomeHolding],
        quotes: &QuoteSet,
        boxes: &[SavingsBox],
        goals: &[Goal],
        now: DateTime<Utc>,
    ) -> PortfolioOverview {
        let variable_holdings = self.valuation_service.value_variable_all(variable, quotes);
        let fixed_holdings = self.valuation_service.value_fixed_all(fixed, now);

        let summary = self
            .aggregation_service
            .aggregate(&variable_holdings, &fixed_holdings);
        let net_worth =
            self.net_worth_service
                .compose_net_worth(&summary, savings_total(boxes), goals_total(goals));
        let upcoming = upcoming_maturities(&fixed_holdings, self.settings.upcoming_maturities)
            .into_iter()
            .cloned()
            .collect();

        PortfolioOverview {
            variable_holdings,
            fixed_holdings,
            summary,
            net_worth,
            goals: self.net_worth_service.goals_overview(goals),
            upcoming_maturities: upcoming,
            quotes_degraded: quotes.upstream_failed(),
        }
    }

    // ── Emergency Reserve ───────────────────────────────────────────

    /// Burn rate over `[month_start, month_end]` and the reserve status.
    pub async fn reserve_report(
        &self,
        source: &dyn FinanceDataSource,
        month_start: NaiveDate,
        month_end: NaiveDate,
    ) -> Result<ReserveReport, CoreError> {
        if month_start > month_end {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({month_start}) must not be after 'to' date ({month_end})"
            )));
        }

        let (reserve, expenses) = tokio::join!(
            source.emergency_reserve(),
            source.expenses(month_start, month_end),
        );
        let reserve = reserve.unwrap_or_else(|e| {
            warn!("Failed to read emergency reserve from {}: {e}", source.name());
            None
        });
        let expenses = or_empty(expenses, source.name(), "expenses");

        let burn_rate = self
            .reserve_service
            .monthly_burn_rate(&expenses, month_start, month_end);
        let status = self.reserve_service.evaluate(burn_rate.total, reserve.as_ref());

        Ok(ReserveReport { burn_rate, status })
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Cash-flow report for `(year, month)` with a `months`-long monthly chart.
    pub async fn cash_flow_report(
        &mut self,
        source: &dyn FinanceDataSource,
        year: i32,
        month: u32,
        months: u32,
        now: DateTime<Utc>,
    ) -> Result<CashFlowReport, CoreError> {
        // Reject a bad span before any read or quote request goes out.
        check_span(months)?;
        let (period_start, period_end) = month_bounds(year, month)?;
        let (first_y, first_m) = months_back(year, month, months.saturating_sub(1));
        let (history_start, _) = month_bounds(first_y, first_m)?;

        let (expenses, incomes, overview) = tokio::join!(
            source.expenses(history_start, period_end),
            source.incomes(history_start, period_end),
            self.portfolio_overview(source, now),
        );
        let history_expenses = or_empty(expenses, source.name(), "expenses");
        let history_incomes = or_empty(incomes, source.name(), "incomes");

        let period_expenses: Vec<_> = history_expenses
            .iter()
            .filter(|e| e.date >= period_start && e.date <= period_end)
            .cloned()
            .collect();
        let period_incomes: Vec<_> = history_incomes
            .iter()
            .filter(|i| i.date >= period_start && i.date <= period_end)
            .cloned()
            .collect();

        self.report_service.cash_flow_report(
            &period_expenses,
            &period_incomes,
            &history_expenses,
            &history_incomes,
            year,
            month,
            months,
            &overview.net_worth,
        )
    }

    /// Budget usage and card-limit usage for `(year, month)`.
    pub async fn budget_report(
        &self,
        source: &dyn FinanceDataSource,
        year: i32,
        month: u32,
    ) -> Result<BudgetReport, CoreError> {
        let (start, end) = month_bounds(year, month)?;
        let (budgets, expenses, cards) = tokio::join!(
            source.budgets(year, month),
            source.expenses(start, end),
            source.credit_cards(),
        );
        let budgets = or_empty(budgets, source.name(), "budgets");
        let expenses = or_empty(expenses, source.name(), "expenses");
        let cards = or_empty(cards, source.name(), "credit cards");

        Ok(BudgetReport {
            budgets: self.report_service.budget_overview(&budgets, &expenses),
            card_limit_usage: self.report_service.card_limit_usage(&cards, &expenses),
        })
    }

    // ── Quotes ──────────────────────────────────────────────────────

    /// Quotes for arbitrary tickers (cache first, then the provider).
    pub async fn fetch_quotes(&mut self, symbols: &[String]) -> QuoteSet {
        self.quote_gateway.fetch_quotes(symbols).await
    }

    /// Drop the quote cache and re-fetch every tracked ticker.
    pub async fn refresh_quotes(&mut self, source: &dyn FinanceDataSource) -> QuoteSet {
        self.quote_gateway.clear_cache();
        let tickers = or_empty(source.tracked_tickers().await, source.name(), "tickers");
        self.quote_gateway.fetch_quotes(&tickers).await
    }

    pub async fn search_symbols(&self, query: &str) -> Vec<SymbolMatch> {
        self.quote_gateway.search_symbols(query).await
    }

    #[must_use]
    pub fn cached_quote_count(&self) -> usize {
        self.quote_gateway.cache().len()
    }

    pub fn clear_quote_cache(&mut self) {
        self.quote_gateway.clear_cache();
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the display currency. Must be a 3-letter alphabetic code.
    pub fn set_default_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let mut updated = self.settings.clone();
        updated.default_currency = currency.trim().to_uppercase();
        updated.validate()?;
        self.settings = updated;
        Ok(())
    }

    /// Set the length of "top holdings" lists.
    pub fn set_top_n(&mut self, top_n: usize) {
        self.settings.top_n = top_n;
        self.aggregation_service = AggregationService::new(top_n);
    }

    /// Replace the quote API settings. Rebuilds the gateway, which also
    /// drops the quote cache.
    pub fn set_quote_api(&mut self, quote_api: QuoteApiSettings) -> Result<(), CoreError> {
        let mut updated = self.settings.clone();
        updated.quote_api = quote_api;
        updated.validate()?;
        self.quote_gateway = QuoteGateway::from_settings(&updated.quote_api)?;
        self.settings = updated;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings, quote_gateway: QuoteGateway) -> Self {
        let aggregation_service = AggregationService::new(settings.top_n);
        Self {
            settings,
            quote_gateway,
            valuation_service: ValuationService::new(),
            aggregation_service,
            net_worth_service: NetWorthService::new(),
            reserve_service: ReserveService::new(),
            report_service: ReportService::new(),
        }
    }
}

/// A failed read renders as an empty state rather than failing the page.
fn or_empty<T>(result: Result<Vec<T>, CoreError>, source: &str, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!("Failed to read {what} from {source}: {e}");
        Vec::new()
    })
}

/// Drop records that fail validation, logging each one.
fn keep_valid<T>(records: Vec<T>, validate: impl Fn(&T) -> Result<(), CoreError>) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| match validate(record) {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping invalid record: {e}");
                false
            }
        })
        .collect()
}
