use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use pennybook::domain::{EntryRequest, ExpenseRecord};
use pennybook::errors::Result;
use pennybook::month::parse_month_token;
use pennybook::store::{ExpenseStore, JsonStore};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated store backed by a unique directory for each test.
pub fn setup_test_env() -> (JsonStore, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = JsonStore::open(base.join("expenses.json")).expect("open json store");
    (store, base)
}

/// Runs raw form fields through validation and into the store, the same way
/// the interactive entry session does.
#[allow(clippy::too_many_arguments)]
pub fn insert_entry(
    store: &mut dyn ExpenseStore,
    name: &str,
    day: u32,
    month_token: &str,
    year: i32,
    category: &str,
    amount: f64,
    payer_fraction: f64,
    recurring: bool,
) -> Result<ExpenseRecord> {
    let request = EntryRequest {
        name: name.into(),
        day,
        month: parse_month_token(month_token)?,
        year,
        category: category.into(),
        amount,
        payer_fraction,
        recurring,
    };
    store.insert(request.validate()?)
}
