//! Month normalization and the inclusive calendar-month query window.

use chrono::{Datelike, NaiveDate};

use crate::errors::{FinanceError, Result};
use crate::lookup;

/// A month as supplied by the user: either a number or a name token.
///
/// Downstream code only ever sees the normalized 1-12 number; this enum
/// exists so that both spellings pass through a single boundary check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthArg {
    Number(i64),
    Token(String),
}

impl From<i64> for MonthArg {
    fn from(value: i64) -> Self {
        MonthArg::Number(value)
    }
}

impl From<&str> for MonthArg {
    fn from(value: &str) -> Self {
        MonthArg::Token(value.to_string())
    }
}

/// Normalizes a month argument to its 1-based number.
pub fn resolve_month(arg: &MonthArg) -> Result<u32> {
    match arg {
        MonthArg::Number(value) => {
            if (1..=12).contains(value) {
                Ok(*value as u32)
            } else {
                Err(FinanceError::InvalidMonth(format!(
                    "{value} is not a valid month number"
                )))
            }
        }
        MonthArg::Token(token) => lookup::month_from_abbrev(token.trim()).ok_or_else(|| {
            FinanceError::InvalidMonth(format!("`{}` is not a recognized month", token.trim()))
        }),
    }
}

/// Classifies raw user text as a month number or name and normalizes it.
///
/// Numeric text that is not a whole number (e.g. `1.5`) is a type error
/// rather than a month error.
pub fn parse_month_token(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return resolve_month(&MonthArg::Number(number));
    }
    if trimmed.parse::<f64>().is_ok() {
        return Err(FinanceError::InvalidType(format!(
            "month must be a whole number or a name, got `{trimmed}`"
        )));
    }
    resolve_month(&MonthArg::Token(trimmed.to_string()))
}

pub fn parse_year(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| FinanceError::InvalidType(format!("year must be an integer, got `{}`", raw.trim())))
}

/// Inclusive `[first_day, last_day]` bounds for one calendar month.
///
/// Computed fresh per report request and discarded after use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            FinanceError::InvalidMonth(format!("no such calendar month: {year}-{month}"))
        })?;
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| {
                FinanceError::InvalidMonth(format!("no such calendar month: {year}-{month}"))
            })?;
        Ok(Self { first, last })
    }

    pub fn containing(date: NaiveDate) -> Self {
        // A date always lies in a representable month, so this cannot fail.
        Self::new(date.year(), date.month()).expect("date lies in a valid month")
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Number of days in the month, accounting for leap years.
    pub fn day_count(&self) -> u32 {
        self.last.day()
    }

    /// Window for the calendar month immediately before this one.
    pub fn previous(&self) -> Self {
        let prior = self.first.pred_opt().expect("month has a preceding day");
        Self::containing(prior)
    }

    /// Canonical `YYYY-MM_MonthName` label, used as the report folder name.
    pub fn label(&self) -> String {
        format!(
            "{:04}-{:02}_{}",
            self.year(),
            self.month(),
            lookup::month_name(self.month())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_spellings_normalize_to_the_same_number() {
        for raw in ["jan", "Jan", "JAN", "1"] {
            assert_eq!(parse_month_token(raw).unwrap(), 1, "input {raw}");
        }
    }

    #[test]
    fn out_of_range_and_unknown_months_are_rejected() {
        for raw in ["0", "13", "foo"] {
            let err = parse_month_token(raw).unwrap_err();
            assert!(
                matches!(err, FinanceError::InvalidMonth(_)),
                "input {raw} gave {err:?}"
            );
        }
    }

    #[test]
    fn fractional_month_is_a_type_error() {
        let err = parse_month_token("1.5").unwrap_err();
        assert!(matches!(err, FinanceError::InvalidType(_)));
    }

    #[test]
    fn non_integer_year_is_a_type_error() {
        assert!(matches!(
            parse_year("twenty22").unwrap_err(),
            FinanceError::InvalidType(_)
        ));
        assert_eq!(parse_year(" 2022 ").unwrap(), 2022);
    }

    #[test]
    fn window_covers_the_true_month_length() {
        let feb_leap = MonthWindow::new(2020, 2).unwrap();
        assert_eq!(feb_leap.last, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
        let feb = MonthWindow::new(2022, 2).unwrap();
        assert_eq!(feb.day_count(), 28);
        let dec = MonthWindow::new(2022, 12).unwrap();
        assert_eq!(dec.last, NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
    }

    #[test]
    fn previous_window_crosses_year_boundaries() {
        let jan = MonthWindow::new(2022, 1).unwrap();
        let dec = jan.previous();
        assert_eq!(dec.year(), 2021);
        assert_eq!(dec.month(), 12);
    }

    #[test]
    fn label_uses_full_month_name() {
        let window = MonthWindow::new(2022, 1).unwrap();
        assert_eq!(window.label(), "2022-01_January");
    }
}
