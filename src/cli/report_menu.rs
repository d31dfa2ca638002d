//! Month-query session: pick a month, run the report pipeline, and the
//! recurring carry-forward flow.

use std::path::PathBuf;

use chrono::{Datelike, Local};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::config::Config;
use crate::errors::Result;
use crate::format::format_currency;
use crate::lookup;
use crate::month::{parse_month_token, parse_year, MonthArg, MonthWindow};
use crate::recurring::carry_forward;
use crate::report::run_month_report;
use crate::store::ExpenseStore;

use super::output;
use super::prompt_error;

pub fn report_session(store: &dyn ExpenseStore, config: &Config) -> Result<()> {
    output::section("Month query");
    let (month, year) = prompt_month_year()?;
    let dest_root: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Save reports under")
        .default(config.report_root.display().to_string())
        .interact_text()
        .map_err(prompt_error)?;

    let dest = run_month_report(
        &MonthArg::Number(month as i64),
        year,
        store,
        &PathBuf::from(dest_root),
    )?;
    output::success(format!("reports saved to {}", dest.display()));
    Ok(())
}

pub fn carry_forward_session(store: &mut dyn ExpenseStore) -> Result<()> {
    output::section("Carry recurring forward");
    let (month, year) = prompt_month_year()?;
    let target = MonthWindow::new(year, month)?;

    let entries = carry_forward(store, &target)?;
    if entries.is_empty() {
        output::info(format!(
            "no recurring expenses found in {}",
            target.previous().label()
        ));
        return Ok(());
    }

    for entry in &entries {
        println!(
            "  {}  {}  {}  {}",
            entry.date.format("%d-%b-%Y"),
            entry.category,
            format_currency(entry.amount),
            entry.name
        );
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Insert {} entries into {}?", entries.len(), target.label()))
        .default(true)
        .interact()
        .map_err(prompt_error)?;
    if !confirmed {
        output::info("nothing inserted");
        return Ok(());
    }

    let count = entries.len();
    for entry in entries {
        store.insert(entry)?;
    }
    output::success(format!("inserted {count} recurring entries"));
    Ok(())
}

fn prompt_month_year() -> Result<(u32, i32)> {
    let theme = ColorfulTheme::default();
    let today = Local::now().date_naive();
    let month = loop {
        let token: String = Input::with_theme(&theme)
            .with_prompt("Month")
            .default(lookup::month_abbrev(today.month()).to_string())
            .interact_text()
            .map_err(prompt_error)?;
        match parse_month_token(&token) {
            Ok(month) => break month,
            Err(err) => output::warning(err),
        }
    };
    let year = loop {
        let raw: String = Input::with_theme(&theme)
            .with_prompt("Year")
            .default(today.year().to_string())
            .interact_text()
            .map_err(prompt_error)?;
        match parse_year(&raw) {
            Ok(year) => break year,
            Err(err) => output::warning(err),
        }
    };
    Ok((month, year))
}
