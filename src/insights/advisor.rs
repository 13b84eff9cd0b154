//! Threshold and trend rules that turn a snapshot into advisory messages.
//!
//! Budget rules run first, one per budgeted category in configuration order.
//! Month-over-month rules follow, one per category that has any transaction,
//! in first-seen order.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::{percent_of, total};
use crate::ledger::Snapshot;

const WARNING_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const SUCCESS_PERCENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const TREND_PERCENT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    /// Close to the limit
    Warning,
    /// Over the limit
    Danger,
    /// Comfortably under the limit
    Success,
    /// Notable change against last month
    Info,
}

impl Severity {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Insight {
    pub(crate) severity: Severity,
    pub(crate) category: String,
    pub(crate) message: String,
}

impl Insight {
    fn new(severity: Severity, category: &str, message: String) -> Self {
        Self {
            severity,
            category: category.to_string(),
            message,
        }
    }
}

pub(super) fn generate(snapshot: &Snapshot<'_>, reference: NaiveDate) -> Vec<Insight> {
    let mut insights = budget_insights(snapshot);
    insights.extend(trend_insights(snapshot, reference));
    insights
}

fn budget_insights(snapshot: &Snapshot<'_>) -> Vec<Insight> {
    let mut insights = Vec::new();

    for budget in snapshot.budgets.iter().filter(|b| b.is_set()) {
        let category = budget.category.as_str();
        let spent = snapshot.spent_in(category);
        let remaining = budget.amount - spent;
        let percent_used = percent_of(spent, budget.amount);

        if percent_used >= WARNING_PERCENT && percent_used < Decimal::ONE_HUNDRED {
            insights.push(Insight::new(
                Severity::Warning,
                category,
                format!(
                    "You've used {}% of your {category} budget. Only {} remaining.",
                    whole_percent(percent_used),
                    money(remaining)
                ),
            ));
        } else if percent_used >= Decimal::ONE_HUNDRED {
            insights.push(Insight::new(
                Severity::Danger,
                category,
                format!(
                    "You've exceeded your {category} budget by {}.",
                    money(remaining.abs())
                ),
            ));
        } else if percent_used <= SUCCESS_PERCENT && spent > Decimal::ZERO {
            insights.push(Insight::new(
                Severity::Success,
                category,
                format!(
                    "Great job! You've only used {}% of your {category} budget.",
                    whole_percent(percent_used)
                ),
            ));
        }
    }

    insights
}

fn trend_insights(snapshot: &Snapshot<'_>, reference: NaiveDate) -> Vec<Insight> {
    let current = (reference.year(), reference.month());
    let previous = previous_month(current);

    let mut categories: Vec<&str> = Vec::new();
    for txn in snapshot.transactions {
        if !categories.contains(&txn.category.as_str()) {
            categories.push(&txn.category);
        }
    }

    let month_spend = |category: &str, (year, month): (i32, u32)| -> Decimal {
        total(
            snapshot
                .transactions
                .iter()
                .filter(|t| t.category == category && t.date.year() == year && t.date.month() == month)
                .map(|t| t.amount),
        )
    };

    let mut insights = Vec::new();
    for category in categories {
        let previous_spend = month_spend(category, previous);
        // No base to compare against.
        if previous_spend <= Decimal::ZERO {
            continue;
        }
        let current_spend = month_spend(category, current);
        let change = percent_of(current_spend - previous_spend, previous_spend);

        if change > TREND_PERCENT {
            insights.push(Insight::new(
                Severity::Info,
                category,
                format!(
                    "Your {category} spending increased by {}% compared to last month.",
                    whole_percent(change)
                ),
            ));
        } else if change < -TREND_PERCENT {
            insights.push(Insight::new(
                Severity::Info,
                category,
                format!(
                    "Your {category} spending decreased by {}% compared to last month.",
                    whole_percent(change.abs())
                ),
            ));
        }
    }

    insights
}

/// The (year, month) before `(year, month)`; January wraps to December.
pub(super) fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn whole_percent(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

fn money(value: Decimal) -> String {
    format!(
        "${:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
