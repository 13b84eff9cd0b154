use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::ledger::{Field, LedgerError};

/// Largest amount accepted for a single transaction or budget.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Session-unique transaction identifier, handed out by the ledger's counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TransactionId(pub(crate) u64);

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub(crate) id: TransactionId,
    /// Always positive; the sign carries no debit/credit meaning.
    pub(crate) amount: Decimal,
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
}

impl Transaction {
    pub(crate) fn from_draft(id: TransactionId, draft: TransactionDraft) -> Self {
        Self {
            id,
            amount: draft.amount,
            description: draft.description,
            date: draft.date,
            category: draft.category,
        }
    }

    /// The editable fields of this transaction, e.g. as a base for a partial edit.
    pub(crate) fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount,
            description: self.description.clone(),
            date: self.date,
            category: self.category.clone(),
        }
    }
}

/// Typed candidate for a new or edited transaction (everything except the id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransactionDraft {
    pub(crate) amount: Decimal,
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
}

impl TransactionDraft {
    pub(crate) fn new(
        amount: Decimal,
        description: impl Into<String>,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            date,
            category: category.into(),
        }
    }
}

/// Raw text fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionInput {
    pub(crate) amount: String,
    pub(crate) description: String,
    pub(crate) date: String,
    pub(crate) category: String,
}

impl TransactionInput {
    /// Parse the text fields into a draft. Fields are checked in the order
    /// amount, description, date, category and the first failure is returned.
    /// Category membership is checked later by the ledger.
    pub(crate) fn parse(&self) -> Result<TransactionDraft, LedgerError> {
        let amount = parse_amount(&self.amount)?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(LedgerError::validation(
                Field::Description,
                "description is required",
            ));
        }

        let date = parse_date(&self.date)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(LedgerError::validation(Field::Category, "category is required"));
        }

        Ok(TransactionDraft::new(amount, description, date, category))
    }
}

/// Parse a positive amount. A leading `$` is tolerated.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let amount = Decimal::from_str(trimmed).map_err(|_| {
        LedgerError::validation(Field::Amount, format!("'{raw}' is not a number"))
    })?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(
            Field::Amount,
            "amount must be a positive number",
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::validation(
            Field::Amount,
            "amount cannot exceed $1,000,000,000.00",
        ));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::validation(Field::Date, format!("'{raw}' is not a valid date (YYYY-MM-DD)"))
    })
}
