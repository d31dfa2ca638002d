//! Display formatting for the single fixed report currency and for dates.

use chrono::NaiveDate;

pub const CURRENCY_SYMBOL: &str = "£";

/// Formats a value as fixed two-decimal currency with thousands grouping.
///
/// A negative value carries its minus sign before the currency symbol
/// (`-£12.34`), never between the symbol and the digits.
pub fn format_currency(value: f64) -> String {
    let body = format!("{:.2}", value.abs());
    let grouped = group_thousands(&body);
    if value < 0.0 {
        format!("-{CURRENCY_SYMBOL}{grouped}")
    } else {
        format!("{CURRENCY_SYMBOL}{grouped}")
    }
}

/// `DD-Mon-YYYY` display form used in every report view.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

fn group_thousands(body: &str) -> String {
    let (int_part, frac_part) = match body.find('.') {
        Some(pos) => (&body[..pos], &body[pos..]),
        None => (body, ""),
    };
    let mut grouped = String::new();
    let mut count = 0;
    for ch in int_part.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped.push_str(frac_part);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_sign_precedes_the_symbol() {
        assert_eq!(format_currency(-12.3), "-£12.30");
    }

    #[test]
    fn zero_formats_with_two_decimals() {
        assert_eq!(format_currency(0.0), "£0.00");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_currency(1234.5), "£1,234.50");
        assert_eq!(format_currency(-1_234_567.891), "-£1,234,567.89");
    }

    #[test]
    fn date_display_is_day_mon_year() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 5).unwrap();
        assert_eq!(format_date(date), "05-Jan-2022");
    }
}
