//! Carries the prior month's recurring expenses forward into a target month,
//! so rent and subscriptions do not have to be re-keyed every month.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::NewExpense;
use crate::errors::Result;
use crate::month::MonthWindow;
use crate::store::ExpenseStore;

/// Templates for the target month built from the previous calendar month's
/// recurring set. Day-of-month is clamped to the target month's length
/// (Jan 31 -> Feb 28/29). Nothing is inserted; the caller decides.
pub fn carry_forward(store: &dyn ExpenseStore, target: &MonthWindow) -> Result<Vec<NewExpense>> {
    let source = target.previous();
    let prior = store.recurring_in_window(&source)?;
    debug!(
        source = %source.label(),
        target = %target.label(),
        count = prior.len(),
        "recurring carry-forward"
    );

    Ok(prior
        .into_iter()
        .map(|record| {
            let day = record.date.day().min(target.day_count());
            let date = NaiveDate::from_ymd_opt(target.year(), target.month(), day)
                .expect("clamped day is within the target month");
            NewExpense {
                name: record.name,
                date,
                category: record.category,
                amount: record.amount,
                payer_share: record.payer_share,
                recurring: true,
            }
        })
        .collect())
}
