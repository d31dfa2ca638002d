use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{ExpenseRecord, NewExpense, RecordId};
use crate::errors::{FinanceError, Result};
use crate::month::MonthWindow;

use super::ExpenseStore;

const TMP_SUFFIX: &str = "tmp";

/// Append-only expense collection persisted as a single JSON document.
///
/// Records are held in memory in insertion order; every mutation rewrites
/// the file through a temp-file rename so a crash never truncates it.
pub struct JsonStore {
    path: PathBuf,
    records: Vec<ExpenseRecord>,
    next_id: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    next_id: u64,
    records: Vec<ExpenseRecord>,
}

impl JsonStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str::<StoreDocument>(&data)?
        } else {
            StoreDocument::default()
        };
        let highest = document
            .records
            .iter()
            .map(|record| record.id.0 + 1)
            .max()
            .unwrap_or(0);
        Ok(Self {
            path,
            next_id: document.next_id.max(highest),
            records: document.records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let document = StoreDocument {
            next_id: self.next_id,
            records: self.records.clone(),
        };
        let json = serde_json::to_string_pretty(&document)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ExpenseStore for JsonStore {
    fn insert(&mut self, expense: NewExpense) -> Result<ExpenseRecord> {
        let record = expense.into_record(RecordId(self.next_id));
        self.next_id += 1;
        self.records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    fn remove_most_recent(&mut self) -> Result<Option<ExpenseRecord>> {
        let newest = self
            .records
            .iter()
            .enumerate()
            .max_by_key(|(_, record)| record.id);
        let Some((index, _)) = newest else {
            return Ok(None);
        };
        let removed = self.records.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    fn records_in_window(&self, window: &MonthWindow) -> Result<Vec<ExpenseRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| window.contains(record.date))
            .cloned()
            .collect())
    }

    fn recurring_in_window(&self, window: &MonthWindow) -> Result<Vec<ExpenseRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.recurring && window.contains(record.date))
            .cloned()
            .collect())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ExpenseRecord>> {
        let mut by_id: Vec<&ExpenseRecord> = self.records.iter().collect();
        by_id.sort_by_key(|record| std::cmp::Reverse(record.id));
        let dates: BTreeSet<_> = by_id.iter().take(limit).map(|record| record.date).collect();
        let mut matched: Vec<ExpenseRecord> = self
            .records
            .iter()
            .filter(|record| dates.contains(&record.date))
            .cloned()
            .collect();
        matched.sort_by_key(|record| record.date);
        Ok(matched)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                FinanceError::Storage(format!("cannot create {}: {err}", parent.display()))
            })?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::open(temp.path().join("expenses.json")).expect("open store");
        (store, temp)
    }

    fn expense(name: &str, day: u32, recurring: bool) -> NewExpense {
        NewExpense {
            name: name.into(),
            date: NaiveDate::from_ymd_opt(2022, 1, day).unwrap(),
            category: "GROC".into(),
            amount: 10.0,
            payer_share: 5.0,
            recurring,
        }
    }

    #[test]
    fn insert_assigns_increasing_ids_and_survives_reopen() {
        let (mut store, guard) = store_with_temp_dir();
        let first = store.insert(expense("a", 1, false)).unwrap();
        let second = store.insert(expense("b", 2, false)).unwrap();
        assert!(second.id > first.id);

        let reopened = JsonStore::open(guard.path().join("expenses.json")).unwrap();
        assert_eq!(reopened.len(), 2);
        let third_id = reopened.next_id;
        assert!(third_id > second.id.0);
    }

    #[test]
    fn remove_most_recent_undoes_the_last_insert() {
        let (mut store, _guard) = store_with_temp_dir();
        store.insert(expense("keep", 1, false)).unwrap();
        store.insert(expense("drop", 2, false)).unwrap();
        let removed = store.remove_most_recent().unwrap().unwrap();
        assert_eq!(removed.name, "drop");
        assert_eq!(store.len(), 1);
        // Emptying out is not an error.
        store.remove_most_recent().unwrap();
        assert!(store.remove_most_recent().unwrap().is_none());
    }

    #[test]
    fn window_queries_respect_inclusive_bounds() {
        let (mut store, _guard) = store_with_temp_dir();
        store.insert(expense("first", 1, false)).unwrap();
        store.insert(expense("last", 31, true)).unwrap();
        let mut feb = expense("outside", 1, false);
        feb.date = NaiveDate::from_ymd_opt(2022, 2, 1).unwrap();
        store.insert(feb).unwrap();

        let window = MonthWindow::new(2022, 1).unwrap();
        let january = store.records_in_window(&window).unwrap();
        assert_eq!(january.len(), 2);

        let recurring = store.recurring_in_window(&window).unwrap();
        assert_eq!(recurring.len(), 1);
        assert_eq!(recurring[0].name, "last");
    }

    #[test]
    fn recent_returns_all_records_for_the_latest_dates() {
        let (mut store, _guard) = store_with_temp_dir();
        store.insert(expense("old", 1, false)).unwrap();
        store.insert(expense("same-day a", 20, false)).unwrap();
        store.insert(expense("same-day b", 20, false)).unwrap();
        let recent = store.recent(2).unwrap();
        // Two most recent inserts share one date, so only that date matches.
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|record| record.date.day() == 20));
    }
}
