//! Record store seam. The report engine and entry form only ever talk to
//! [`ExpenseStore`]; [`json_store::JsonStore`] is the file-backed default.

pub mod json_store;

pub use json_store::JsonStore;

use crate::domain::{ExpenseRecord, NewExpense};
use crate::errors::Result;
use crate::month::MonthWindow;

pub trait ExpenseStore {
    /// Appends one record, assigning the next creation-ordered identity.
    fn insert(&mut self, expense: NewExpense) -> Result<ExpenseRecord>;

    /// Removes and returns the most recently inserted record, if any.
    fn remove_most_recent(&mut self) -> Result<Option<ExpenseRecord>>;

    /// All records dated inside the inclusive window, in insertion order.
    fn records_in_window(&self, window: &MonthWindow) -> Result<Vec<ExpenseRecord>>;

    /// Recurring-flagged records dated inside the inclusive window.
    fn recurring_in_window(&self, window: &MonthWindow) -> Result<Vec<ExpenseRecord>>;

    /// Records sharing the most recent `limit` distinct dates, date-ascending.
    ///
    /// Backs the entry form's "previous values" log.
    fn recent(&self, limit: usize) -> Result<Vec<ExpenseRecord>>;
}
