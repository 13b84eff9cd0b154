use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TransactionId;

/// The input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Amount,
    Description,
    Date,
    Category,
    Budget,
}

impl Field {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Description => "description",
            Self::Date => "date",
            Self::Category => "category",
            Self::Budget => "budget",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every ledger error is recoverable: the ledger is left untouched and the
/// caller may retry with corrected input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: Field, reason: String },

    #[error(
        "Insufficient budget for {category}: ${attempted:.2} requested, ${available:.2} available"
    )]
    BudgetExceeded {
        category: String,
        attempted: Decimal,
        available: Decimal,
    },

    #[error("Transaction {id} not found")]
    NotFound { id: TransactionId },
}

impl LedgerError {
    pub(crate) fn validation(field: Field, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;
