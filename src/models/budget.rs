use rust_decimal::Decimal;

/// Spending limit for one category. An amount of zero means "no budget set"
/// and disables enforcement for the category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Budget {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
}

impl Budget {
    pub(crate) fn unset(category: String) -> Self {
        Self {
            category,
            amount: Decimal::ZERO,
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}
