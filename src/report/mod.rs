//! Monthly report pipeline: extract -> partition -> render.
//!
//! The extractor is the only stage that touches the store; the partitioner is
//! a pure function of the extracted working set, and the renderer only
//! performs file writes.

pub mod extract;
pub mod partition;
pub mod render;

pub use extract::{extract, EnrichedRecord, MonthSummary};
pub use partition::{partition, ReportRow, ReportView, ValueKey};
pub use render::render_month;

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::month::MonthArg;
use crate::store::ExpenseStore;

/// Runs the full pipeline for one month and returns the report folder.
pub fn run_month_report(
    month: &MonthArg,
    year: i32,
    store: &dyn ExpenseStore,
    dest_root: &Path,
) -> Result<PathBuf> {
    let summary = extract(month, year, store)?;
    let views = partition(&summary);
    render_month(&summary, &views, dest_root)
}
