//! Interactive terminal surface: a small menu loop over the entry form,
//! the month report, and the recurring carry-forward.

mod entry;
mod output;
mod report_menu;

use dialoguer::{theme::ColorfulTheme, Select};
use tracing::info;

use crate::config::ConfigManager;
use crate::errors::{FinanceError, Result};
use crate::store::JsonStore;

const ABOUT: &str = concat!(
    "Pennybook ",
    env!("CARGO_PKG_VERSION"),
    "\n\nRecords itemised and recurring expenses and generates monthly\n",
    "CSV/HTML summaries split by payer, recurrence, and category."
);

fn prompt_error(err: dialoguer::Error) -> FinanceError {
    match err {
        dialoguer::Error::IO(io_err) => FinanceError::Io(io_err),
    }
}

pub fn run_cli() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    if !manager.path().exists() {
        manager.save(&config)?;
    }
    let mut store = JsonStore::open(config.data_file.clone())?;
    info!(store = %store.path().display(), "store opened");

    loop {
        println!();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Pennybook")
            .items(&[
                "Enter expenses",
                "Month report",
                "Carry recurring forward",
                "About",
                "Quit",
            ])
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        let outcome = match choice {
            0 => entry::entry_session(&mut store),
            1 => report_menu::report_session(&store, &config),
            2 => report_menu::carry_forward_session(&mut store),
            3 => {
                println!("{ABOUT}");
                Ok(())
            }
            _ => return Ok(()),
        };
        // User-correctable problems stay in the loop; everything else aborts.
        if let Err(err) = outcome {
            match err {
                FinanceError::Validation(_)
                | FinanceError::InvalidMonth(_)
                | FinanceError::InvalidType(_) => output::warning(err),
                other => return Err(other),
            }
        }
    }
}
