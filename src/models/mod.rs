mod budget;
mod category;
mod transaction;

pub(crate) use budget::Budget;
pub(crate) use category::Category;
pub(crate) use transaction::{
    parse_amount, parse_date, Transaction, TransactionDraft, TransactionId, TransactionInput,
    MAX_AMOUNT,
};
