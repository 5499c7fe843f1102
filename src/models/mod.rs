mod budget_row;
mod category;
mod transaction;

pub use budget_row::{BudgetStatus, CategoryBudgetRow};
pub use category::Category;
pub use transaction::{CategoryRef, Transaction, TransactionType};
