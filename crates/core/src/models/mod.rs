pub mod analytics;
pub mod cash_flow;
pub mod holding;
pub mod instrument;
pub mod net_worth;
pub mod overview;
pub mod performance;
pub mod projection;
pub mod quote;
pub mod reserve;
pub mod settings;
pub mod trade;
pub mod valuation;
