//! Splits the month's working set into the overlapping report views and
//! appends the computed totals rows. Pure; no store or filesystem access.

use crate::format::format_currency;
use crate::lookup::TOTAL_CATEGORY;

use super::extract::{EnrichedRecord, MonthSummary};

/// Which monetary column a view's value-sorted ordering uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKey {
    Amount,
    PayerShare,
}

/// One renderable row: either a real record or a synthetic totals row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    /// Blank for synthetic rows.
    pub date_display: String,
    pub category: String,
    pub amount: f64,
    pub payer_share: f64,
    pub amount_display: String,
    pub payer_display: String,
    recurring: bool,
}

impl ReportRow {
    fn from_record(enriched: &EnrichedRecord) -> Self {
        Self {
            name: enriched.record.name.clone(),
            date_display: enriched.date_display.clone(),
            category: enriched.record.category.clone(),
            amount: enriched.record.amount,
            payer_share: enriched.record.payer_share,
            amount_display: enriched.amount_display.clone(),
            payer_display: enriched.payer_display.clone(),
            recurring: enriched.record.recurring,
        }
    }

    /// Synthetic row summing `amount` and `payer_share` over `rows`.
    ///
    /// Sums cover exactly the rows given; callers never pass another view's
    /// totals row in.
    fn subtotal(name: &str, rows: &[ReportRow]) -> Self {
        let amount: f64 = rows.iter().map(|row| row.amount).sum();
        let payer_share: f64 = rows.iter().map(|row| row.payer_share).sum();
        Self {
            name: name.into(),
            date_display: String::new(),
            category: TOTAL_CATEGORY.into(),
            amount,
            payer_share,
            amount_display: format_currency(amount),
            payer_display: format_currency(payer_share),
            recurring: false,
        }
    }

    pub fn is_totals(&self) -> bool {
        self.category == TOTAL_CATEGORY
    }
}

/// A named partition of the working set, chronological with trailing
/// synthetic rows. Never mutated after construction; the renderer only
/// reads it.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub name: String,
    /// File name stem for artifacts; lower-cased category code for the
    /// per-category views.
    pub file_stem: String,
    pub rows: Vec<ReportRow>,
    pub value_key: ValueKey,
    pub show_category: bool,
    pub show_payer: bool,
}

impl ReportView {
    /// Ascending by the view's value key; the totals row is not pinned and
    /// sorts naturally by its computed sum. Stable for equal values.
    pub fn value_sorted(&self) -> Vec<ReportRow> {
        let mut rows = self.rows.clone();
        let key = self.value_key;
        rows.sort_by(|a, b| {
            let (left, right) = match key {
                ValueKey::Amount => (a.amount, b.amount),
                ValueKey::PayerShare => (a.payer_share, b.payer_share),
            };
            left.total_cmp(&right)
        });
        rows
    }
}

/// Builds all views for one month: overview, positive/negative,
/// payer/non-payer, recurring, and one per distinct category.
pub fn partition(summary: &MonthSummary) -> Vec<ReportView> {
    let rows: Vec<ReportRow> = summary.records.iter().map(ReportRow::from_record).collect();

    let mut views = Vec::new();
    views.push(overview(&rows));
    // The positive/negative split deliberately excludes recurring records;
    // the payer and category splits deliberately do not.
    views.push(tally(
        "positive-expenses",
        rows.iter()
            .filter(|row| !row.recurring && row.amount > 0.0)
            .cloned()
            .collect(),
        ValueKey::Amount,
        true,
        true,
    ));
    views.push(tally(
        "negative-expenses",
        rows.iter()
            .filter(|row| !row.recurring && row.amount < 0.0)
            .cloned()
            .collect(),
        ValueKey::Amount,
        true,
        true,
    ));
    views.push(tally(
        "payer",
        rows.iter()
            .filter(|row| row.payer_share != 0.0)
            .cloned()
            .collect(),
        ValueKey::PayerShare,
        true,
        true,
    ));
    let mut non_payer = tally(
        "non-payer",
        rows.iter()
            .filter(|row| row.payer_share == 0.0)
            .cloned()
            .collect(),
        ValueKey::Amount,
        true,
        true,
    );
    non_payer.show_payer = false;
    views.push(non_payer);
    views.push(tally(
        "recurring",
        rows.iter().filter(|row| row.recurring).cloned().collect(),
        ValueKey::Amount,
        true,
        true,
    ));

    // Categories in first-appearance order; they are upper-cased at entry
    // and consumed as stored.
    let mut categories: Vec<String> = Vec::new();
    for row in &rows {
        if row.category != TOTAL_CATEGORY && !categories.contains(&row.category) {
            categories.push(row.category.clone());
        }
    }
    for category in categories {
        let mut view = tally(
            &category,
            rows.iter()
                .filter(|row| row.category == category)
                .cloned()
                .collect(),
            ValueKey::Amount,
            false,
            true,
        );
        view.file_stem = category.to_lowercase();
        views.push(view);
    }

    views
}

/// The overview: recurring block, non-recurring block, then the recurring
/// subtotal, non-recurring subtotal, and grand total.
fn overview(rows: &[ReportRow]) -> ReportView {
    let recurring: Vec<ReportRow> = rows.iter().filter(|row| row.recurring).cloned().collect();
    let one_off: Vec<ReportRow> = rows.iter().filter(|row| !row.recurring).cloned().collect();

    let recurring_subtotal = ReportRow::subtotal("Recurring subtotal", &recurring);
    let one_off_subtotal = ReportRow::subtotal("Non-recurring subtotal", &one_off);
    let grand_total = ReportRow::subtotal("Totals", rows);

    let mut ordered = recurring;
    ordered.extend(one_off);
    ordered.push(recurring_subtotal);
    ordered.push(one_off_subtotal);
    ordered.push(grand_total);

    ReportView {
        name: "overview".into(),
        file_stem: "overview".into(),
        rows: ordered,
        value_key: ValueKey::Amount,
        show_category: true,
        show_payer: true,
    }
}

fn tally(
    name: &str,
    mut rows: Vec<ReportRow>,
    value_key: ValueKey,
    show_category: bool,
    show_payer: bool,
) -> ReportView {
    let totals = ReportRow::subtotal("Totals", &rows);
    rows.push(totals);
    ReportView {
        name: name.into(),
        file_stem: name.to_lowercase(),
        rows,
        value_key,
        show_category,
        show_payer,
    }
}
