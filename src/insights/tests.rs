#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::advisor::previous_month;
use super::*;
use crate::ledger::Ledger;
use crate::models::{Budget, Category, Transaction, TransactionDraft, TransactionId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ledger() -> Ledger {
    Ledger::new(Category::defaults())
}

fn add(ledger: &mut Ledger, amount: Decimal, category: &str, on: NaiveDate) {
    ledger
        .add_transaction(TransactionDraft::new(amount, "Test", on, category))
        .unwrap();
}

/// Ledger with `budget` set for Food and `spent` already recorded against it.
fn food_budget(budget: Decimal, spent: Decimal) -> Ledger {
    let mut ledger = ledger();
    if spent > Decimal::ZERO {
        add(&mut ledger, spent, "Food", date(2024, 5, 3));
    }
    ledger.set_budget("Food", budget).unwrap();
    ledger
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_empty_ledger_totals_are_zero() {
    let ledger = ledger();
    let snap = ledger.snapshot();
    assert_eq!(snap.total_expenses(), Decimal::ZERO);
    assert_eq!(snap.average_transaction(), Decimal::ZERO);
    assert_eq!(snap.current_month_expenses(date(2024, 1, 1)), Decimal::ZERO);
    assert!(snap.category_breakdown().is_empty());
    assert!(snap.monthly_series().is_empty());
    assert!(snap.budget_comparison().is_empty());
    assert!(snap.generate_insights(date(2024, 1, 1)).is_empty());
}

#[test]
fn test_total_and_average() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(10), "Food", date(2024, 1, 1));
    add(&mut ledger, dec!(20), "Rent", date(2024, 1, 2));
    add(&mut ledger, dec!(30.50), "Food", date(2024, 2, 1));
    let snap = ledger.snapshot();
    assert_eq!(snap.total_expenses(), dec!(60.50));
    assert_eq!(snap.average_transaction().round_dp(2), dec!(20.17));
}

#[test]
fn test_current_month_ignores_year() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(10), "Food", date(2024, 3, 1));
    add(&mut ledger, dec!(5), "Food", date(2023, 3, 31));
    add(&mut ledger, dec!(100), "Food", date(2024, 4, 1));
    let snap = ledger.snapshot();
    assert_eq!(snap.current_month_expenses(date(2024, 3, 15)), dec!(15));
    assert_eq!(snap.current_month_expenses(date(2024, 4, 15)), dec!(100));
}

// ── Breakdowns ────────────────────────────────────────────────

#[test]
fn test_category_breakdown_sums_in_first_seen_order() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(10), "Food", date(2024, 1, 1));
    add(&mut ledger, dec!(200), "Rent", date(2024, 1, 1));
    add(&mut ledger, dec!(5), "Food", date(2024, 1, 2));
    let breakdown = ledger.snapshot().category_breakdown();
    assert_eq!(
        breakdown,
        vec![("Food".to_string(), dec!(15)), ("Rent".to_string(), dec!(200))]
    );
}

#[test]
fn test_monthly_series_keeps_years_apart() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(1), "Food", date(2024, 1, 5));
    add(&mut ledger, dec!(2), "Food", date(2023, 1, 5));
    add(&mut ledger, dec!(4), "Food", date(2024, 1, 25));
    add(&mut ledger, dec!(8), "Food", date(2023, 12, 5));
    let series = ledger.snapshot().monthly_series();

    let keys: Vec<(i32, u32, Decimal)> = series.iter().map(|b| (b.year, b.month, b.total)).collect();
    assert_eq!(
        keys,
        vec![(2023, 1, dec!(2)), (2023, 12, dec!(8)), (2024, 1, dec!(5))]
    );
    assert_eq!(series[0].label(), "Jan");
    assert_eq!(series[1].label(), "Dec");
}

#[test]
fn test_budget_comparison_skips_unset_budgets() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(120), "Food", date(2024, 1, 1));
    add(&mut ledger, dec!(50), "Rent", date(2024, 1, 1));
    ledger.set_budget("Food", dec!(100)).unwrap();
    ledger.set_budget("Shopping", dec!(40)).unwrap();

    let comparison = ledger.snapshot().budget_comparison();
    assert_eq!(comparison.len(), 2);
    assert_eq!(comparison[0].category, "Food");
    assert_eq!(comparison[0].spent, dec!(120));
    assert!(comparison[0].is_over_budget());
    assert_eq!(comparison[1].category, "Shopping");
    assert_eq!(comparison[1].spent, Decimal::ZERO);
    assert!(!comparison[1].is_over_budget());
}

#[test]
fn test_budget_utilization() {
    let ledger = food_budget(dec!(200), dec!(50));
    let snap = ledger.snapshot();
    assert_eq!(snap.budget_utilization("Food"), dec!(25));
    assert_eq!(snap.budget_utilization("Rent"), Decimal::ZERO);
    assert_eq!(snap.budget_utilization("Nope"), Decimal::ZERO);
}

#[test]
fn test_budget_utilization_is_capped() {
    let ledger = food_budget(dec!(100), dec!(250));
    assert_eq!(ledger.snapshot().budget_utilization("Food"), dec!(100));
}

#[test]
fn test_budget_overview_covers_every_category() {
    let ledger = food_budget(dec!(100), dec!(40));
    let rows = ledger.snapshot().budget_overview();
    assert_eq!(rows.len(), ledger.categories().len());

    let food = rows.iter().find(|r| r.category == "Food").unwrap();
    assert!(food.has_budget());
    assert_eq!(food.spent, dec!(40));
    assert_eq!(food.utilization, dec!(40));

    let rent = rows.iter().find(|r| r.category == "Rent").unwrap();
    assert!(!rent.has_budget());
    assert_eq!(rent.utilization, Decimal::ZERO);
}

// ── Budget insights ───────────────────────────────────────────

fn budget_insights(budget: Decimal, spent: Decimal) -> Vec<Insight> {
    // Reference far from the spend month so no trend rules fire.
    food_budget(budget, spent)
        .snapshot()
        .generate_insights(date(2030, 1, 1))
}

#[test]
fn test_warning_near_budget() {
    let insights = budget_insights(dec!(100), dec!(95));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Warning);
    assert_eq!(insights[0].category, "Food");
    assert_eq!(
        insights[0].message,
        "You've used 95% of your Food budget. Only $5.00 remaining."
    );
}

#[test]
fn test_warning_starts_at_ninety_percent() {
    let insights = budget_insights(dec!(100), dec!(90));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Warning);
}

#[test]
fn test_danger_when_exceeded() {
    let insights = budget_insights(dec!(100), dec!(150));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Danger);
    assert_eq!(
        insights[0].message,
        "You've exceeded your Food budget by $50.00."
    );
}

#[test]
fn test_danger_at_exactly_budget() {
    let insights = budget_insights(dec!(100), dec!(100));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Danger);
    assert_eq!(
        insights[0].message,
        "You've exceeded your Food budget by $0.00."
    );
}

#[test]
fn test_success_when_well_under() {
    let insights = budget_insights(dec!(100), dec!(40));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Success);
    assert_eq!(
        insights[0].message,
        "Great job! You've only used 40% of your Food budget."
    );
}

#[test]
fn test_success_boundary_is_inclusive() {
    let insights = budget_insights(dec!(100), dec!(50));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Success);
}

#[test]
fn test_no_threshold_insight_in_middle_band() {
    assert!(budget_insights(dec!(100), dec!(70)).is_empty());
}

#[test]
fn test_no_success_without_spend() {
    assert!(budget_insights(dec!(100), Decimal::ZERO).is_empty());
}

#[test]
fn test_percent_is_rounded_to_whole_number() {
    let insights = budget_insights(dec!(300), dec!(280));
    assert_eq!(
        insights[0].message,
        "You've used 93% of your Food budget. Only $20.00 remaining."
    );
}

#[test]
fn test_unbudgeted_categories_get_no_threshold_insight() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(500), "Rent", date(2024, 5, 1));
    assert!(ledger.snapshot().generate_insights(date(2030, 1, 1)).is_empty());
}

// ── Month-over-month insights ─────────────────────────────────

#[test]
fn test_previous_month_wraps_year() {
    assert_eq!(previous_month((2024, 1)), (2023, 12));
    assert_eq!(previous_month((2024, 7)), (2024, 6));
}

#[test]
fn test_trend_increase() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(100), "Food", date(2024, 4, 10));
    add(&mut ledger, dec!(150), "Food", date(2024, 5, 10));
    let insights = ledger.snapshot().generate_insights(date(2024, 5, 20));
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Info);
    assert_eq!(
        insights[0].message,
        "Your Food spending increased by 50% compared to last month."
    );
}

#[test]
fn test_trend_decrease() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(200), "Rent", date(2024, 4, 1));
    add(&mut ledger, dec!(50), "Rent", date(2024, 5, 1));
    let insights = ledger.snapshot().generate_insights(date(2024, 5, 2));
    assert_eq!(insights.len(), 1);
    assert_eq!(
        insights[0].message,
        "Your Rent spending decreased by 75% compared to last month."
    );
}

#[test]
fn test_trend_drop_to_zero_is_reported() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(80), "Food", date(2024, 4, 1));
    let insights = ledger.snapshot().generate_insights(date(2024, 5, 1));
    assert_eq!(insights.len(), 1);
    assert!(insights[0].message.contains("decreased by 100%"));
}

#[test]
fn test_trend_within_band_is_silent() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(100), "Food", date(2024, 4, 1));
    add(&mut ledger, dec!(120), "Food", date(2024, 5, 1));
    assert!(ledger.snapshot().generate_insights(date(2024, 5, 1)).is_empty());

    let mut ledger = self::ledger();
    add(&mut ledger, dec!(100), "Food", date(2024, 4, 1));
    add(&mut ledger, dec!(80), "Food", date(2024, 5, 1));
    assert!(ledger.snapshot().generate_insights(date(2024, 5, 1)).is_empty());
}

#[test]
fn test_trend_skipped_without_previous_spend() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(1000), "Food", date(2024, 5, 1));
    assert!(ledger.snapshot().generate_insights(date(2024, 5, 1)).is_empty());
}

#[test]
fn test_trend_across_year_boundary() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(100), "Food", date(2023, 12, 15));
    add(&mut ledger, dec!(300), "Food", date(2024, 1, 15));
    // Same month number a year earlier must not count as "previous".
    add(&mut ledger, dec!(5000), "Food", date(2022, 12, 15));
    let insights = ledger.snapshot().generate_insights(date(2024, 1, 20));
    assert_eq!(insights.len(), 1);
    assert_eq!(
        insights[0].message,
        "Your Food spending increased by 200% compared to last month."
    );
}

#[test]
fn test_budget_rules_precede_trend_rules() {
    let mut ledger = ledger();
    add(&mut ledger, dec!(100), "Rent", date(2024, 4, 1));
    add(&mut ledger, dec!(200), "Rent", date(2024, 5, 1));
    add(&mut ledger, dec!(95), "Food", date(2024, 5, 1));
    ledger.set_budget("Food", dec!(100)).unwrap();

    let insights = ledger.snapshot().generate_insights(date(2024, 5, 10));
    let kinds: Vec<(Severity, &str)> = insights
        .iter()
        .map(|i| (i.severity, i.category.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![(Severity::Warning, "Food"), (Severity::Info, "Rent")]
    );
}

#[test]
fn test_severity_as_str() {
    assert_eq!(Severity::Warning.as_str(), "warning");
    assert_eq!(Severity::Danger.as_str(), "danger");
    assert_eq!(Severity::Success.as_str(), "success");
    assert_eq!(format!("{}", Severity::Info), "info");
}

// ── Extreme amounts ───────────────────────────────────────────

/// Close to `Decimal::MAX`; two of these overflow when added.
fn huge() -> Decimal {
    Decimal::from_i128_with_scale(7 * 10_i128.pow(28), 0)
}

fn txn(id: u64, amount: Decimal, on: NaiveDate) -> Transaction {
    Transaction::from_draft(
        TransactionId(id),
        TransactionDraft::new(amount, "Test", on, "Food"),
    )
}

#[test]
fn test_sums_saturate_instead_of_overflowing() {
    let transactions = vec![
        txn(1, huge(), date(2024, 3, 1)),
        txn(2, huge(), date(2024, 3, 2)),
    ];
    let categories = Category::defaults();
    let snap = Snapshot {
        transactions: &transactions,
        budgets: &[],
        categories: &categories,
    };

    assert_eq!(snap.total_expenses(), Decimal::MAX);
    assert_eq!(snap.current_month_expenses(date(2024, 3, 15)), Decimal::MAX);
    assert_eq!(snap.spent_in("Food"), Decimal::MAX);
    assert_eq!(snap.category_breakdown(), vec![("Food".to_string(), Decimal::MAX)]);
    assert_eq!(snap.monthly_series()[0].total, Decimal::MAX);
    assert_eq!(snap.average_transaction(), Decimal::MAX / dec!(2));
}

#[test]
fn test_tiny_budget_with_large_spend_is_exceeded() {
    let transactions = vec![
        txn(1, Decimal::new(1, 28), date(2024, 2, 10)),
        txn(2, huge(), date(2024, 3, 10)),
    ];
    let budgets = vec![Budget {
        category: "Food".into(),
        amount: Decimal::new(1, 28),
    }];
    let categories = Category::defaults();
    let snap = Snapshot {
        transactions: &transactions,
        budgets: &budgets,
        categories: &categories,
    };

    assert_eq!(snap.budget_utilization("Food"), dec!(100));
    let insights = snap.generate_insights(date(2024, 3, 15));
    let kinds: Vec<Severity> = insights.iter().map(|i| i.severity).collect();
    assert_eq!(kinds, vec![Severity::Danger, Severity::Info]);
    assert!(insights[1].message.contains("increased by"));
}
