use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{FinanceError, Result};
use crate::lookup;
use crate::month::MonthWindow;

/// Opaque store-assigned identifier, monotonically ordered by creation.
///
/// Only ever compared to find the most recently inserted record for undo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u64);

/// One logged expense as it exists in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub name: String,
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    pub payer_share: f64,
    pub recurring: bool,
}

/// A validated expense that has not yet been assigned a store identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewExpense {
    pub name: String,
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    pub payer_share: f64,
    pub recurring: bool,
}

impl NewExpense {
    pub fn into_record(self, id: RecordId) -> ExpenseRecord {
        ExpenseRecord {
            id,
            name: self.name,
            date: self.date,
            category: self.category,
            amount: self.amount,
            payer_share: self.payer_share,
            recurring: self.recurring,
        }
    }
}

/// Raw field values collected by one entry-form session.
///
/// Constructed per session and consumed by [`EntryRequest::validate`]; no
/// state outlives the submission.
#[derive(Debug, Clone)]
pub struct EntryRequest {
    pub name: String,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub category: String,
    pub amount: f64,
    /// Fraction of `amount` attributed to the second payer, chosen at entry
    /// time; the fraction itself is not persisted.
    pub payer_fraction: f64,
    pub recurring: bool,
}

impl EntryRequest {
    /// Checks form fields and produces a storable expense.
    ///
    /// Day-of-month is bounds-checked against the actual month length, the
    /// category must belong to the fixed set, and the name must be non-empty.
    pub fn validate(self) -> Result<NewExpense> {
        let window = MonthWindow::new(self.year, self.month)?;
        if self.day < 1 || self.day > window.day_count() {
            return Err(FinanceError::Validation(format!(
                "day {} is not a valid calendar date for {}-{:02}",
                self.day, self.year, self.month
            )));
        }

        let category = self.category.trim().to_uppercase();
        if !lookup::is_valid_category(&category) {
            return Err(FinanceError::Validation(format!(
                "`{category}` is not a known category"
            )));
        }

        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(FinanceError::Validation(
                "name must be a non-empty string".into(),
            ));
        }

        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .expect("day already bounds-checked against month length");

        Ok(NewExpense {
            name,
            date,
            category,
            amount: self.amount,
            payer_share: round_share(self.payer_fraction * self.amount),
            recurring: self.recurring,
        })
    }
}

/// Payer shares are persisted at three decimal places.
fn round_share(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
