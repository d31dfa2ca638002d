pub mod record;

pub use record::{EntryRequest, ExpenseRecord, NewExpense, RecordId};
