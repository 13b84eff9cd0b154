pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod insights;
pub(crate) mod transactions;
