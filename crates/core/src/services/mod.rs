pub mod aggregation_service;
pub mod net_worth_service;
pub mod performance_service;
pub mod projection_service;
pub mod quote_service;
pub mod ratios;
pub mod realized_gains_service;
pub mod report_service;
pub mod reserve_service;
pub mod valuation_service;
