mod error;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{
    Budget, Category, Transaction, TransactionDraft, TransactionId, MAX_AMOUNT,
};

pub(crate) use error::{Field, LedgerError, Result};

/// Owning store of transactions and per-category budgets for one session.
///
/// Exactly one [`Budget`] exists per configured category for the lifetime of
/// the ledger. Mutations take `&mut self`, so the budget check and the append
/// in [`Ledger::add_transaction`] can never interleave with another writer.
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    next_id: u64,
}

/// Read-only view of the ledger consumed by the insight functions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Snapshot<'a> {
    pub(crate) transactions: &'a [Transaction],
    pub(crate) budgets: &'a [Budget],
    pub(crate) categories: &'a [Category],
}

impl Ledger {
    /// Create an empty ledger with one unset budget per category.
    pub(crate) fn new(categories: Vec<Category>) -> Self {
        let budgets = categories
            .iter()
            .map(|c| Budget::unset(c.name.clone()))
            .collect();
        Self {
            categories,
            transactions: Vec::new(),
            budgets,
            next_id: 1,
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            transactions: &self.transactions,
            budgets: &self.budgets,
            categories: &self.categories,
        }
    }

    pub(crate) fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub(crate) fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn budget_for(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }

    /// Sum of all transaction amounts in `category`.
    pub(crate) fn category_spend(&self, category: &str) -> Decimal {
        self.snapshot().spent_in(category)
    }

    /// Transactions newest first. Same-day entries keep insertion order.
    pub(crate) fn recent_transactions(&self) -> Vec<&Transaction> {
        let mut recent: Vec<&Transaction> = self.transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Append a transaction with a fresh id.
    ///
    /// Field validation runs first. Then, if the category has a budget set and
    /// the new amount would push its spend over that budget, the transaction
    /// is rejected with [`LedgerError::BudgetExceeded`] and nothing changes.
    pub(crate) fn add_transaction(&mut self, draft: TransactionDraft) -> Result<&Transaction> {
        let draft = self.validate(draft)?;

        let current_spend = self.category_spend(&draft.category);
        if let Some(budget) = self.budget_for(&draft.category).filter(|b| b.is_set()) {
            let exceeds = current_spend
                .checked_add(draft.amount)
                .map_or(true, |total| total > budget.amount);
            if exceeds {
                let available = (budget.amount - current_spend).max(Decimal::ZERO);
                info!(
                    category = %draft.category,
                    attempted = %draft.amount,
                    %available,
                    "transaction rejected by budget"
                );
                return Err(LedgerError::BudgetExceeded {
                    category: draft.category,
                    attempted: draft.amount,
                    available,
                });
            }
        }

        let id = TransactionId(self.next_id);
        self.next_id += 1;
        debug!(%id, category = %draft.category, amount = %draft.amount, "transaction added");
        self.transactions.push(Transaction::from_draft(id, draft));
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Replace every field of an existing transaction, keeping its id.
    ///
    /// Fields are validated, but the budget is not re-checked: an edit may
    /// leave a category over budget.
    pub(crate) fn edit_transaction(
        &mut self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> Result<&Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(LedgerError::NotFound { id })?;
        let draft = self.validate(draft)?;

        debug!(%id, "transaction edited");
        self.transactions[index] = Transaction::from_draft(id, draft);
        Ok(&self.transactions[index])
    }

    /// Remove a transaction. Unknown ids are ignored; returns whether
    /// anything was removed.
    pub(crate) fn delete_transaction(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            debug!(%id, "transaction deleted");
        }
        removed
    }

    /// Overwrite the budget for `category`. Zero clears the budget.
    pub(crate) fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<&Budget> {
        let name = self.canonical_category(category)?;
        if amount < Decimal::ZERO {
            return Err(LedgerError::validation(
                Field::Budget,
                "budget cannot be negative",
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(LedgerError::validation(
                Field::Budget,
                "budget cannot exceed $1,000,000,000.00",
            ));
        }

        let index = self
            .budgets
            .iter()
            .position(|b| b.category == name)
            .ok_or_else(|| LedgerError::validation(Field::Category, format!("no budget for '{name}'")))?;
        self.budgets[index].amount = amount;
        debug!(category = %name, %amount, "budget set");
        Ok(&self.budgets[index])
    }

    // ── Validation ────────────────────────────────────────────

    fn validate(&self, mut draft: TransactionDraft) -> Result<TransactionDraft> {
        if draft.amount <= Decimal::ZERO {
            return Err(LedgerError::validation(
                Field::Amount,
                "amount must be a positive number",
            ));
        }
        if draft.amount > MAX_AMOUNT {
            return Err(LedgerError::validation(
                Field::Amount,
                "amount cannot exceed $1,000,000,000.00",
            ));
        }

        let description = draft.description.trim();
        if description.is_empty() {
            return Err(LedgerError::validation(
                Field::Description,
                "description is required",
            ));
        }
        draft.description = description.to_string();

        draft.category = self.canonical_category(&draft.category)?;
        Ok(draft)
    }

    fn canonical_category(&self, name: &str) -> Result<String> {
        Category::find_by_name(&self.categories, name)
            .map(|c| c.name.clone())
            .ok_or_else(|| {
                LedgerError::validation(Field::Category, format!("unknown category '{name}'"))
            })
    }
}
