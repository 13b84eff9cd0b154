//! Derived views over a ledger [`Snapshot`].
//!
//! Everything here is a pure function of the snapshot (and, for the
//! time-relative views, a reference date). Nothing is cached; callers
//! recompute after every mutation.

mod advisor;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::ledger::Snapshot;

pub(crate) use advisor::{Insight, Severity};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Total spend for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthBucket {
    pub(crate) year: i32,
    /// 1-based month number.
    pub(crate) month: u32,
    pub(crate) total: Decimal,
}

impl MonthBucket {
    /// Short month name, e.g. "Jan".
    pub(crate) fn label(&self) -> &'static str {
        MONTH_LABELS
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("???")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetComparison {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
}

impl BudgetComparison {
    pub(crate) fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }
}

/// One row of the budget overview: every category, budgeted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetRow {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    /// Percent of budget used, capped at 100. Zero when no budget is set.
    pub(crate) utilization: Decimal,
}

impl BudgetRow {
    pub(crate) fn has_budget(&self) -> bool {
        self.budget > Decimal::ZERO
    }
}

impl Snapshot<'_> {
    pub(crate) fn total_expenses(&self) -> Decimal {
        total(self.transactions.iter().map(|t| t.amount))
    }

    /// Spend in the calendar month of `reference`. Only the month number is
    /// compared, so the same month of other years is included.
    pub(crate) fn current_month_expenses(&self, reference: NaiveDate) -> Decimal {
        total(
            self.transactions
                .iter()
                .filter(|t| t.date.month() == reference.month())
                .map(|t| t.amount),
        )
    }

    /// Mean transaction amount, zero for an empty ledger.
    pub(crate) fn average_transaction(&self) -> Decimal {
        if self.transactions.is_empty() {
            return Decimal::ZERO;
        }
        self.total_expenses() / Decimal::from(self.transactions.len())
    }

    /// Sum of all transaction amounts in `category`.
    pub(crate) fn spent_in(&self, category: &str) -> Decimal {
        total(
            self.transactions
                .iter()
                .filter(|t| t.category == category)
                .map(|t| t.amount),
        )
    }

    /// Per-category totals in first-seen order. Categories without
    /// transactions are left out.
    pub(crate) fn category_breakdown(&self) -> Vec<(String, Decimal)> {
        let mut breakdown: Vec<(String, Decimal)> = Vec::new();
        for txn in self.transactions {
            match breakdown.iter_mut().find(|(name, _)| *name == txn.category) {
                Some((_, total)) => *total = pinned_add(*total, txn.amount),
                None => breakdown.push((txn.category.clone(), txn.amount)),
            }
        }
        breakdown
    }

    /// Monthly totals keyed by (year, month), oldest first.
    pub(crate) fn monthly_series(&self) -> Vec<MonthBucket> {
        let mut series: Vec<MonthBucket> = Vec::new();
        for txn in self.transactions {
            let (year, month) = (txn.date.year(), txn.date.month());
            match series
                .iter_mut()
                .find(|b| b.year == year && b.month == month)
            {
                Some(bucket) => bucket.total = pinned_add(bucket.total, txn.amount),
                None => series.push(MonthBucket {
                    year,
                    month,
                    total: txn.amount,
                }),
            }
        }
        series.sort_by_key(|b| (b.year, b.month));
        series
    }

    /// Budget vs. spend for every category that has a budget set.
    pub(crate) fn budget_comparison(&self) -> Vec<BudgetComparison> {
        self.budgets
            .iter()
            .filter(|b| b.is_set())
            .map(|b| BudgetComparison {
                category: b.category.clone(),
                budget: b.amount,
                spent: self.spent_in(&b.category),
            })
            .collect()
    }

    /// Percent of the category's budget used, capped at 100. Zero when the
    /// category has no budget set.
    pub(crate) fn budget_utilization(&self, category: &str) -> Decimal {
        let budget = self
            .budgets
            .iter()
            .find(|b| b.category == category)
            .map_or(Decimal::ZERO, |b| b.amount);
        utilization(self.spent_in(category), budget)
    }

    /// Budget, spend and utilization for every configured category.
    pub(crate) fn budget_overview(&self) -> Vec<BudgetRow> {
        self.categories
            .iter()
            .map(|c| {
                let budget = self
                    .budgets
                    .iter()
                    .find(|b| b.category == c.name)
                    .map_or(Decimal::ZERO, |b| b.amount);
                BudgetRow {
                    category: c.name.clone(),
                    budget,
                    spent: self.spent_in(&c.name),
                    utilization: self.budget_utilization(&c.name),
                }
            })
            .collect()
    }

    /// Advisory messages for `reference`'s month. See [`advisor`].
    pub(crate) fn generate_insights(&self, reference: NaiveDate) -> Vec<Insight> {
        advisor::generate(self, reference)
    }
}

fn utilization(spent: Decimal, budget: Decimal) -> Decimal {
    if budget > Decimal::ZERO {
        percent_of(spent, budget).min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    }
}

/// `a + b`, held at `Decimal::MAX` instead of overflowing.
fn pinned_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Sum of non-negative amounts, held at `Decimal::MAX` instead of overflowing.
fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, pinned_add)
}

/// `part / whole * 100` for a positive `whole`. A quotient too large to
/// represent is held at `Decimal::MAX`; `part >= -whole` keeps the negative
/// side in range.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests;
