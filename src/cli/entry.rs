//! Interactive expense-entry session: prompt, validate, insert, undo.

use chrono::{Datelike, Local};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::domain::{EntryRequest, ExpenseRecord};
use crate::errors::{FinanceError, Result};
use crate::lookup;
use crate::month::parse_month_token;
use crate::store::ExpenseStore;

use super::output;
use super::prompt_error;

/// How many previous distinct dates the session log shows.
const HISTORY: usize = 10;

pub fn entry_session(store: &mut dyn ExpenseStore) -> Result<()> {
    output::section("Itemised expenses");
    print_log_header();
    for record in store.recent(HISTORY)? {
        println!("{}", log_line(&record));
    }

    loop {
        let action = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Entry")
            .items(&["Add expense", "Undo last entry", "Back"])
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match action {
            0 => match add_expense(store) {
                Ok(record) => println!("{}", log_line(&record)),
                Err(FinanceError::Validation(message)) => output::warning(message),
                Err(FinanceError::InvalidMonth(message))
                | Err(FinanceError::InvalidType(message)) => output::warning(message),
                Err(other) => return Err(other),
            },
            1 => match store.remove_most_recent()? {
                Some(record) => output::success(format!("removed `{}`", record.name)),
                None => output::info("nothing to undo"),
            },
            _ => return Ok(()),
        }
    }
}

fn add_expense(store: &mut dyn ExpenseStore) -> Result<ExpenseRecord> {
    let theme = ColorfulTheme::default();
    let today = Local::now().date_naive();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Name")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    let day: u32 = Input::with_theme(&theme)
        .with_prompt("Day")
        .default(today.day())
        .interact_text()
        .map_err(prompt_error)?;
    let month_token: String = Input::with_theme(&theme)
        .with_prompt("Month")
        .default(lookup::month_abbrev(today.month()).to_string())
        .interact_text()
        .map_err(prompt_error)?;
    let year: i32 = Input::with_theme(&theme)
        .with_prompt("Year")
        .default(today.year())
        .interact_text()
        .map_err(prompt_error)?;
    let category: String = Input::with_theme(&theme)
        .with_prompt(format!("Category ({})", lookup::VALID_CATEGORIES.join(", ")))
        .interact_text()
        .map_err(prompt_error)?;
    let amount: f64 = Input::with_theme(&theme)
        .with_prompt("Amount (£)")
        .interact_text()
        .map_err(prompt_error)?;
    let payer_fraction: f64 = Input::with_theme(&theme)
        .with_prompt("Payer fraction")
        .default(0.5)
        .interact_text()
        .map_err(prompt_error)?;
    let recurring = Confirm::with_theme(&theme)
        .with_prompt("Recurring?")
        .default(false)
        .interact()
        .map_err(prompt_error)?;

    let request = EntryRequest {
        name,
        day,
        month: parse_month_token(&month_token)?,
        year,
        category,
        amount,
        payer_fraction,
        recurring,
    };
    let expense = request.validate()?;
    store.insert(expense)
}

fn print_log_header() {
    let header = format!(
        "{:<40} | {:<10} | {:<8} | {:<10} | {:<10} | {:<9}",
        "Name of Expense", "Date", "Category", "Amount", "Payer", "Recurring"
    );
    println!("{header}");
    println!("{}", "-".repeat(header.len()));
}

/// Fixed-width log line; a negative value carries its sign before the symbol.
fn log_line(record: &ExpenseRecord) -> String {
    let sign = if record.amount < 0.0 { "-" } else { " " };
    let recurring = if record.recurring { "Yes" } else { "No" };
    format!(
        "{:<40} | {:<10} | {:^8} | {}£{:>8.2} | {}£{:>8.2} | {:<9}",
        record.name,
        record.date.format("%d-%b-%y"),
        record.category,
        sign,
        record.amount.abs(),
        sign,
        record.payer_share.abs(),
        recurring
    )
}
