// ═══════════════════════════════════════════════════════════════════
// Service Tests: valuation, aggregation, net worth, reserve, reports
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use finance_tracker_core::models::cash_flow::{Budget, CreditCard, Expense, Income, PaymentMethod};
use finance_tracker_core::models::holding::{FixedIncomeHolding, VariableIncomeHolding};
use finance_tracker_core::models::instrument::{FixedIncomeClass, VariableIncomeClass};
use finance_tracker_core::models::net_worth::{Goal, GoalKind, NetWorthBucket, SavingsBox};
use finance_tracker_core::models::quote::{Quote, QuoteSet};
use finance_tracker_core::models::reserve::{EmergencyReserve, ReserveStatus, ReserveTier};
use finance_tracker_core::models::valuation::{
    FallbackReason, PriceSource, ValuedFixedHolding, ValuedVariableHolding,
};
use finance_tracker_core::services::aggregation_service::{
    allocation_by_class, rank_by_current_value, upcoming_maturities, AggregationService,
};
use finance_tracker_core::services::net_worth_service::{goals_total, savings_total, NetWorthService};
use finance_tracker_core::services::report_service::{
    expense_split, month_bounds, months_back, savings_rate, ReportService,
};
use finance_tracker_core::services::reserve_service::{tier_for, ReserveService};
use finance_tracker_core::services::valuation_service::{days_to_maturity, ValuationService};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(y: i32, m: u32, day: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, day, h, 0, 0).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn stock(ticker: &str, qty: f64, cost: f64) -> VariableIncomeHolding {
    VariableIncomeHolding::new(ticker, VariableIncomeClass::Stock, qty, cost)
}

fn valued_variable(ticker: &str, class: VariableIncomeClass, qty: f64, cost: f64) -> ValuedVariableHolding {
    let holding = VariableIncomeHolding::new(ticker, class, qty, cost);
    ValuationService::new().value_variable(&holding, None)
}

fn valued_fixed(name: &str, class: FixedIncomeClass, invested: f64, current: f64) -> ValuedFixedHolding {
    let holding = FixedIncomeHolding::new(name, class, invested, current);
    ValuationService::new().value_fixed(&holding, at(2025, 1, 1, 0))
}

// ═══════════════════════════════════════════════════════════════════
// ValuationService
// ═══════════════════════════════════════════════════════════════════

mod valuation {
    use super::*;

    #[test]
    fn missing_quote_falls_back_to_average_cost() {
        let valued = ValuationService::new().value_variable(&stock("ABCD3", 10.0, 50.0), None);
        assert_close(valued.current_value, 500.0);
        assert_close(valued.gain, 0.0);
        assert_close(valued.gain_percent, 0.0);
        assert_close(valued.current_price, 50.0);
        assert_eq!(
            valued.price_source,
            PriceSource::Fallback(FallbackReason::NoMarketData)
        );
    }

    #[test]
    fn quote_price_is_applied() {
        let quote = Quote::new("ABCD3", 60.0, 2.5);
        let valued = ValuationService::new().value_variable(&stock("ABCD3", 10.0, 50.0), Some(&quote));
        assert_close(valued.current_value, 600.0);
        assert_close(valued.gain, 100.0);
        assert_close(valued.gain_percent, 20.0);
        assert_close(valued.day_change_percent, 2.5);
        assert_eq!(valued.price_source, PriceSource::Live);
    }

    #[test]
    fn zero_priced_quote_is_treated_as_missing() {
        let quote = Quote::new("ABCD3", 0.0, 0.0);
        let valued = ValuationService::new().value_variable(&stock("ABCD3", 10.0, 50.0), Some(&quote));
        assert_close(valued.current_value, 500.0);
        assert!(matches!(valued.price_source, PriceSource::Fallback(_)));
    }

    #[test]
    fn zero_cost_gives_zero_percent_not_nan() {
        let quote = Quote::new("GIFT3", 10.0, 0.0);
        let valued = ValuationService::new().value_variable(&stock("GIFT3", 5.0, 0.0), Some(&quote));
        assert_close(valued.gain, 50.0);
        assert_eq!(valued.gain_percent, 0.0);
    }

    #[test]
    fn unreachable_upstream_is_distinguished_from_unknown_symbol() {
        let svc = ValuationService::new();
        let holding = stock("ABCD3", 1.0, 10.0);

        let answered = QuoteSet::from_quotes(vec![Quote::new("OTHER3", 1.0, 0.0)]);
        let unknown = svc.value_variable_from_set(&holding, &answered);
        assert_eq!(
            unknown.price_source,
            PriceSource::Fallback(FallbackReason::NoMarketData)
        );

        let down = svc.value_variable_from_set(&holding, &QuoteSet::unavailable());
        assert_eq!(
            down.price_source,
            PriceSource::Fallback(FallbackReason::QuoteUnavailable)
        );
        assert_close(down.current_value, 10.0);
    }

    #[test]
    fn quote_lookup_matches_ticker_case_insensitively() {
        let quotes = QuoteSet::from_quotes(vec![Quote::new("petr4", 40.0, 0.0)]);
        let valued = ValuationService::new().value_variable_from_set(&stock("PETR4", 2.0, 30.0), &quotes);
        assert_close(valued.current_value, 80.0);
    }

    #[test]
    fn fixed_income_uses_stored_amounts() {
        let holding = FixedIncomeHolding::new("CDB", FixedIncomeClass::Cdb, 1000.0, 1150.0)
            .with_maturity(d(2025, 1, 11));
        let valued = ValuationService::new().value_fixed(&holding, at(2025, 1, 1, 0));
        assert_close(valued.current_value, 1150.0);
        assert_close(valued.invested_value, 1000.0);
        assert_close(valued.gain, 150.0);
        assert_close(valued.gain_percent, 15.0);
        assert_eq!(valued.days_to_maturity, Some(10));
    }

    #[test]
    fn fixed_income_without_investment_is_zero_percent() {
        let valued = valued_fixed("Gift", FixedIncomeClass::Savings, 0.0, 100.0);
        assert_eq!(valued.gain_percent, 0.0);
    }

    #[test]
    fn no_maturity_means_no_days() {
        let valued = valued_fixed("Poupança", FixedIncomeClass::Savings, 100.0, 101.0);
        assert_eq!(valued.days_to_maturity, None);
    }

    #[test]
    fn days_to_maturity_rounds_up() {
        assert_eq!(days_to_maturity(d(2025, 1, 20), at(2025, 1, 15, 0)), 5);
        assert_eq!(days_to_maturity(d(2025, 1, 20), at(2025, 1, 15, 12)), 5);
        assert_eq!(days_to_maturity(d(2025, 1, 16), at(2025, 1, 15, 23)), 1);
    }

    #[test]
    fn days_to_maturity_on_and_after_the_date() {
        assert_eq!(days_to_maturity(d(2025, 1, 15), at(2025, 1, 15, 12)), 0);
        assert_eq!(days_to_maturity(d(2025, 1, 14), at(2025, 1, 15, 0)), -1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// AggregationService
// ═══════════════════════════════════════════════════════════════════

mod aggregation {
    use super::*;

    #[test]
    fn portfolio_totals_combine_families() {
        let svc = ValuationService::new();
        let quotes = QuoteSet::from_quotes(vec![Quote::new("AAAA3", 12.0, 0.0)]);
        let variable = svc.value_variable_all(&[stock("AAAA3", 100.0, 10.0)], &quotes);
        let fixed = vec![valued_fixed("CDB", FixedIncomeClass::Cdb, 1000.0, 800.0)];

        let summary = AggregationService::new(5).aggregate(&variable, &fixed);
        assert_close(summary.variable_income.total_current, 1200.0);
        assert_close(summary.fixed_income.total_current, 800.0);
        assert_close(summary.total_invested, 2000.0);
        assert_close(summary.total_current, 2000.0);
        assert_close(summary.total_gain, 0.0);
        assert_close(summary.total_gain_percent, 0.0);
        assert_eq!(summary.holding_count(), 2);
    }

    #[test]
    fn gain_percent_over_total_invested() {
        let variable = vec![valued_variable("A", VariableIncomeClass::Stock, 1.0, 100.0)];
        let fixed = vec![valued_fixed("CDB", FixedIncomeClass::Cdb, 100.0, 150.0)];
        let summary = AggregationService::new(5).aggregate(&variable, &fixed);
        assert_close(summary.total_gain, 50.0);
        assert_close(summary.total_gain_percent, 25.0);
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        let summary = AggregationService::new(5)
            .aggregate::<ValuedVariableHolding, ValuedFixedHolding>(&[], &[]);
        assert_eq!(summary.total_current, 0.0);
        assert_eq!(summary.total_gain_percent, 0.0);
        assert!(summary.variable_income.allocation.is_empty());
        assert!(summary.fixed_income.top_holdings.is_empty());
    }

    #[test]
    fn allocation_groups_by_class_in_first_seen_order() {
        let holdings = vec![
            valued_variable("FII1", VariableIncomeClass::RealEstateFund, 1.0, 100.0),
            valued_variable("STK1", VariableIncomeClass::Stock, 1.0, 300.0),
            valued_variable("FII2", VariableIncomeClass::RealEstateFund, 1.0, 100.0),
        ];
        let slices = allocation_by_class(&holdings);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].key, "fii");
        assert_eq!(slices[0].label, "FII");
        assert_close(slices[0].value, 200.0);
        assert_close(slices[0].percent, 40.0);
        assert_eq!(slices[1].key, "acao");
        assert_close(slices[1].percent, 60.0);
    }

    #[test]
    fn zero_value_classes_are_excluded() {
        let holdings = vec![
            valued_variable("ETF1", VariableIncomeClass::Etf, 0.0, 100.0),
            valued_variable("STK1", VariableIncomeClass::Stock, 1.0, 300.0),
        ];
        let slices = allocation_by_class(&holdings);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].key, "acao");
    }

    #[test]
    fn unknown_class_is_summed_under_raw_key() {
        let holdings = vec![
            valued_fixed("A", FixedIncomeClass::from("lig"), 10.0, 10.0),
            valued_fixed("B", FixedIncomeClass::from("lig"), 5.0, 5.0),
        ];
        let slices = allocation_by_class(&holdings);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].key, "lig");
        assert_eq!(slices[0].label, "lig");
        assert_eq!(slices[0].color, "#6b7280");
        assert_close(slices[0].value, 15.0);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let holdings = vec![
            valued_variable("FIRST", VariableIncomeClass::Stock, 1.0, 100.0),
            valued_variable("BIG", VariableIncomeClass::Stock, 1.0, 500.0),
            valued_variable("SECOND", VariableIncomeClass::Stock, 1.0, 100.0),
            valued_variable("THIRD", VariableIncomeClass::Stock, 2.0, 50.0),
        ];
        for _ in 0..3 {
            let ranked: Vec<&str> = rank_by_current_value(&holdings)
                .iter()
                .map(|h| h.holding.ticker.as_str())
                .collect();
            assert_eq!(ranked, vec!["BIG", "FIRST", "SECOND", "THIRD"]);
        }
    }

    #[test]
    fn ranking_with_nan_value_keeps_finite_values_ordered() {
        let mut broken = valued_variable("BROKEN", VariableIncomeClass::Stock, 1.0, 1.0);
        broken.current_value = f64::NAN;
        let holdings = vec![
            valued_variable("SMALL", VariableIncomeClass::Stock, 1.0, 10.0),
            broken,
            valued_variable("BIG", VariableIncomeClass::Stock, 1.0, 900.0),
            valued_variable("MID", VariableIncomeClass::Stock, 1.0, 300.0),
        ];
        let ranked = rank_by_current_value(&holdings);
        assert_eq!(ranked.len(), 4);
        let finite: Vec<&str> = ranked
            .iter()
            .filter(|h| h.current_value.is_finite())
            .map(|h| h.holding.ticker.as_str())
            .collect();
        assert_eq!(finite, vec!["BIG", "MID", "SMALL"]);
    }

    #[test]
    fn top_n_is_truncated_and_ranked_from_one() {
        let holdings: Vec<_> = (1..=7)
            .map(|i| valued_variable(&format!("T{i}"), VariableIncomeClass::Stock, 1.0, i as f64))
            .collect();
        let family = AggregationService::new(5).summarize_family(&holdings);
        assert_eq!(family.top_holdings.len(), 5);
        assert_eq!(family.top_holdings[0].rank, 1);
        assert_eq!(family.top_holdings[0].name, "T7");
        assert_eq!(family.top_holdings[4].name, "T3");
        assert_eq!(family.holding_count, 7);
    }

    #[test]
    fn top_holding_percent_is_against_whole_portfolio() {
        let variable = vec![valued_variable("A", VariableIncomeClass::Stock, 1.0, 300.0)];
        let fixed = vec![valued_fixed("CDB", FixedIncomeClass::Cdb, 700.0, 700.0)];
        let summary = AggregationService::new(5).aggregate(&variable, &fixed);
        assert_close(summary.variable_income.top_holdings[0].portfolio_percent, 30.0);
        assert_close(summary.fixed_income.top_holdings[0].portfolio_percent, 70.0);
    }

    #[test]
    fn zero_total_portfolio_percent_is_zero() {
        let variable = vec![valued_variable("A", VariableIncomeClass::Stock, 0.0, 10.0)];
        let summary = AggregationService::new(5)
            .aggregate::<ValuedVariableHolding, ValuedFixedHolding>(&variable, &[]);
        assert_eq!(summary.variable_income.top_holdings[0].portfolio_percent, 0.0);
    }

    #[test]
    fn upcoming_maturities_skip_past_and_undated() {
        let svc = ValuationService::new();
        let now = at(2025, 1, 1, 0);
        let holdings: Vec<_> = [
            FixedIncomeHolding::new("Far", FixedIncomeClass::Cdb, 1.0, 1.0).with_maturity(d(2026, 1, 1)),
            FixedIncomeHolding::new("Past", FixedIncomeClass::Cdb, 1.0, 1.0).with_maturity(d(2024, 6, 1)),
            FixedIncomeHolding::new("Soon", FixedIncomeClass::Lci, 1.0, 1.0).with_maturity(d(2025, 2, 1)),
            FixedIncomeHolding::new("Undated", FixedIncomeClass::Savings, 1.0, 1.0),
            FixedIncomeHolding::new("Mid", FixedIncomeClass::Lca, 1.0, 1.0).with_maturity(d(2025, 6, 1)),
            FixedIncomeHolding::new("Later", FixedIncomeClass::Cri, 1.0, 1.0).with_maturity(d(2025, 9, 1)),
        ]
        .iter()
        .map(|h| svc.value_fixed(h, now))
        .collect();

        let names: Vec<&str> = upcoming_maturities(&holdings, 3)
            .iter()
            .map(|h| h.holding.name.as_str())
            .collect();
        assert_eq!(names, vec!["Soon", "Mid", "Later"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// NetWorthService
// ═══════════════════════════════════════════════════════════════════

mod net_worth {
    use super::*;

    fn summary(variable: f64, fixed: f64) -> finance_tracker_core::models::analytics::PortfolioSummary {
        let v = vec![valued_variable("A", VariableIncomeClass::Stock, 1.0, variable)];
        let f = vec![valued_fixed("CDB", FixedIncomeClass::Cdb, fixed, fixed)];
        AggregationService::new(5).aggregate(&v, &f)
    }

    #[test]
    fn total_adds_all_buckets() {
        let breakdown = NetWorthService::new().compose_net_worth(&summary(400.0, 300.0), 200.0, 100.0);
        assert_close(breakdown.total, 1000.0);
        assert_eq!(breakdown.allocation.len(), 4);
        assert_close(breakdown.allocation[0].percent, 40.0);
        assert_eq!(breakdown.allocation[3].label, "Objetivos");
    }

    #[test]
    fn zero_buckets_are_absent() {
        let breakdown = NetWorthService::new().compose_net_worth(&summary(400.0, 0.0), 100.0, 0.0);
        let keys: Vec<&str> = breakdown.allocation.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["variable_income", "savings_boxes"]);
    }

    #[test]
    fn empty_net_worth_has_no_slices() {
        let empty = AggregationService::new(5)
            .aggregate::<ValuedVariableHolding, ValuedFixedHolding>(&[], &[]);
        let breakdown = NetWorthService::new().compose_net_worth(&empty, 0.0, 0.0);
        assert_eq!(breakdown.total, 0.0);
        assert!(breakdown.allocation.is_empty());
        assert_eq!(
            NetWorthService::new().bucket_share(&breakdown, NetWorthBucket::Goals),
            0.0
        );
    }

    #[test]
    fn bucket_share() {
        let breakdown = NetWorthService::new().compose_net_worth(&summary(400.0, 300.0), 200.0, 100.0);
        assert_close(
            NetWorthService::new().bucket_share(&breakdown, NetWorthBucket::FixedIncome),
            30.0,
        );
    }

    #[test]
    fn totals_helpers() {
        let boxes = vec![SavingsBox::new("Trip", 150.0), SavingsBox::new("Gifts", 50.0)];
        let goals = vec![
            Goal::new("Car", GoalKind::Project, 1000.0, 250.0),
            Goal::new("Emergency", GoalKind::Emergency, 500.0, 500.0),
        ];
        assert_close(savings_total(&boxes), 200.0);
        assert_close(goals_total(&goals), 750.0);
    }

    #[test]
    fn goals_overview_caps_progress_and_counts_completed() {
        let goals = vec![
            Goal::new("Car", GoalKind::Project, 1000.0, 250.0),
            Goal::new("Party", GoalKind::Dream, 100.0, 150.0),
            Goal::new("Unset", GoalKind::Dream, 0.0, 0.0),
        ];
        let overview = NetWorthService::new().goals_overview(&goals);
        assert_close(overview.goals[0].progress_percent, 25.0);
        assert_close(overview.goals[1].progress_percent, 100.0);
        assert_eq!(overview.goals[2].progress_percent, 0.0);
        // A zero target counts as reached.
        assert_eq!(overview.completed_count, 3);
        assert_close(overview.total_saved, 400.0);
        assert_close(overview.progress_percent, 400.0 / 1100.0 * 100.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ReserveService
// ═══════════════════════════════════════════════════════════════════

mod reserve {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_for(2.999), ReserveTier::Critical);
        assert_eq!(tier_for(3.0), ReserveTier::Warning);
        assert_eq!(tier_for(5.999), ReserveTier::Warning);
        assert_eq!(tier_for(6.0), ReserveTier::Safe);
        assert_eq!(tier_for(0.0), ReserveTier::Critical);
    }

    #[test]
    fn not_configured_returns_milestones_only() {
        let status = ReserveService::new().evaluate(2000.0, None);
        assert_eq!(status.tier(), None);
        let targets: Vec<f64> = status.milestones().iter().map(|m| m.target).collect();
        assert_eq!(targets, vec![6000.0, 12000.0, 24000.0]);
        assert!(status.milestones().iter().all(|m| m.progress_percent == 0.0));
        assert!(matches!(status, ReserveStatus::NotConfigured { .. }));
    }

    #[test]
    fn configured_reserve_covers_months() {
        let reserve = EmergencyReserve::new(9000.0, 18000.0);
        let status = ReserveService::new().evaluate(3000.0, Some(&reserve));
        match status {
            ReserveStatus::Configured {
                months_covered,
                tier,
                progress_percent,
                ref milestones,
                ..
            } => {
                assert_close(months_covered, 3.0);
                assert_eq!(tier, ReserveTier::Warning);
                assert_close(progress_percent, 50.0);
                assert_close(milestones[0].progress_percent, 100.0);
                assert_close(milestones[1].progress_percent, 50.0);
                assert_close(milestones[2].progress_percent, 25.0);
            }
            other => panic!("expected configured status, got {other:?}"),
        }
    }

    #[test]
    fn exactly_six_months_is_safe() {
        let reserve = EmergencyReserve::new(6000.0, 6000.0);
        let status = ReserveService::new().evaluate(1000.0, Some(&reserve));
        assert_eq!(status.tier(), Some(ReserveTier::Safe));
    }

    #[test]
    fn progress_is_capped_at_hundred() {
        let reserve = EmergencyReserve::new(150.0, 100.0);
        match ReserveService::new().evaluate(10.0, Some(&reserve)) {
            ReserveStatus::Configured { progress_percent, .. } => assert_eq!(progress_percent, 100.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn zero_expenses_and_zero_target_are_zero_not_nan() {
        let reserve = EmergencyReserve::new(500.0, 0.0);
        match ReserveService::new().evaluate(0.0, Some(&reserve)) {
            ReserveStatus::Configured {
                months_covered,
                progress_percent,
                tier,
                ref milestones,
                ..
            } => {
                assert_eq!(months_covered, 0.0);
                assert_eq!(progress_percent, 0.0);
                assert_eq!(tier, ReserveTier::Critical);
                assert!(milestones.iter().all(|m| m.progress_percent == 0.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn burn_rate_sums_month_and_recurring() {
        let expenses = vec![
            Expense::new(1200.0, d(2025, 3, 1)).recurring(),
            Expense::new(300.0, d(2025, 3, 31)),
            Expense::new(999.0, d(2025, 4, 1)),
            Expense::new(50.0, d(2025, 2, 28)).recurring(),
        ];
        let rate = ReserveService::new().monthly_burn_rate(&expenses, d(2025, 3, 1), d(2025, 3, 31));
        assert_close(rate.total, 1500.0);
        assert_close(rate.recurring, 1200.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ReportService
// ═══════════════════════════════════════════════════════════════════

mod reports {
    use super::*;

    #[test]
    fn month_helpers() {
        assert_eq!(month_bounds(2024, 2).unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(month_bounds(2025, 12).unwrap(), (d(2025, 12, 1), d(2025, 12, 31)));
        assert!(month_bounds(2025, 13).is_err());
        assert_eq!(months_back(2025, 2, 3), (2024, 11));
        assert_eq!(months_back(2025, 1, 0), (2025, 1));
    }

    #[test]
    fn monthly_buckets_oldest_first_across_year_boundary() {
        let expenses = vec![
            Expense::new(100.0, d(2024, 11, 30)),
            Expense::new(50.0, d(2025, 1, 1)),
            Expense::new(25.0, d(2025, 1, 31)),
            Expense::new(999.0, d(2024, 10, 31)),
        ];
        let incomes = vec![Income::new(3000.0, d(2024, 12, 5), "Salary")];

        let buckets = ReportService::new()
            .monthly_buckets(&expenses, &incomes, 2025, 1, 3)
            .unwrap();
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-11", "2024-12", "2025-01"]);
        assert_close(buckets[0].expenses, 100.0);
        assert_close(buckets[1].income, 3000.0);
        assert_close(buckets[1].balance(), 3000.0);
        assert_close(buckets[2].expenses, 75.0);
    }

    #[test]
    fn monthly_buckets_validate_span() {
        assert!(ReportService::new().monthly_buckets(&[], &[], 2025, 1, 0).is_err());
        assert!(ReportService::new().monthly_buckets(&[], &[], 2025, 0, 6).is_err());
    }

    #[test]
    fn savings_rate_guards_zero_income() {
        assert_close(savings_rate(5000.0, 4000.0), 20.0);
        assert_eq!(savings_rate(0.0, 100.0), 0.0);
    }

    #[test]
    fn fixed_and_variable_split() {
        let expenses = vec![
            Expense::new(1000.0, d(2025, 3, 1)).recurring(),
            Expense::new(200.0, d(2025, 3, 2)),
            Expense::new(300.0, d(2025, 3, 3)),
        ];
        assert_eq!(expense_split(&expenses), (1000.0, 500.0));
    }

    #[test]
    fn budget_usage_per_category_and_total() {
        let food = Uuid::new_v4();
        let fun = Uuid::new_v4();
        let budgets = vec![
            Budget { category_id: food, limit: 1000.0, month: 3, year: 2025 },
            Budget { category_id: fun, limit: 0.0, month: 3, year: 2025 },
        ];
        let expenses = vec![
            Expense::new(600.0, d(2025, 3, 1)).in_category(food),
            Expense::new(300.0, d(2025, 3, 2)).in_category(food),
            Expense::new(100.0, d(2025, 3, 3)).in_category(fun),
        ];
        let overview = ReportService::new().budget_overview(&budgets, &expenses);
        assert_close(overview.categories[0].spent, 900.0);
        assert_close(overview.categories[0].percent, 90.0);
        assert_eq!(overview.categories[1].percent, 0.0);
        assert_close(overview.total_spent, 1000.0);
        assert_close(overview.percent, 100.0);
    }

    #[test]
    fn budget_without_limits_is_zero_percent() {
        let expenses = vec![Expense::new(10.0, d(2025, 3, 1))];
        let overview = ReportService::new().budget_overview(&[], &expenses);
        assert_eq!(overview.percent, 0.0);
    }

    #[test]
    fn card_limit_usage() {
        let card = CreditCard { id: Uuid::new_v4(), name: "Visa".into(), limit: 2000.0 };
        let mut charged = Expense::new(500.0, d(2025, 3, 1));
        charged.payment_method = Some(PaymentMethod::CreditCard);
        let mut by_card = Expense::new(100.0, d(2025, 3, 2));
        by_card.card_id = Some(card.id);
        let pix = Expense::new(900.0, d(2025, 3, 3));

        let svc = ReportService::new();
        assert_close(svc.card_limit_usage(&[card], &[charged.clone(), by_card, pix]), 30.0);
        assert_eq!(svc.card_limit_usage(&[], &[charged]), 0.0);
    }
}
