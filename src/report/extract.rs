use tracing::{debug, info};

use crate::domain::ExpenseRecord;
use crate::errors::Result;
use crate::format::{format_currency, format_date};
use crate::month::{resolve_month, MonthArg, MonthWindow};
use crate::store::ExpenseStore;

/// One record of the working set, carrying its pre-computed display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: ExpenseRecord,
    pub date_display: String,
    pub amount_display: String,
    pub payer_display: String,
}

impl EnrichedRecord {
    fn new(record: ExpenseRecord) -> Self {
        let date_display = format_date(record.date);
        let amount_display = format_currency(record.amount);
        let payer_display = format_currency(record.payer_share);
        Self {
            record,
            date_display,
            amount_display,
            payer_display,
        }
    }
}

/// The immutable working set the partitioner and renderer consume.
#[derive(Debug, Clone)]
pub struct MonthSummary {
    pub window: MonthWindow,
    /// Canonical `YYYY-MM_MonthName` destination-folder label.
    pub label: String,
    /// Date-ascending; same-day entries keep their insertion order.
    pub records: Vec<EnrichedRecord>,
}

/// Fetches, sorts, and enriches one calendar month of records.
///
/// A month with no records is not an error; it yields an empty working set.
pub fn extract(month: &MonthArg, year: i32, store: &dyn ExpenseStore) -> Result<MonthSummary> {
    let month_number = resolve_month(month)?;
    let window = MonthWindow::new(year, month_number)?;

    let mut records = store.records_in_window(&window)?;
    // Stable sort: equal dates preserve insertion order.
    records.sort_by_key(|record| record.date);
    debug!(
        first = %window.first,
        last = %window.last,
        count = records.len(),
        "extracted month window"
    );

    let summary = MonthSummary {
        window,
        label: window.label(),
        records: records.into_iter().map(EnrichedRecord::new).collect(),
    };
    info!(label = %summary.label, records = summary.records.len(), "month summary ready");
    Ok(summary)
}
