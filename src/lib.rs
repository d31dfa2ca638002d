//! Pennybook records itemized and recurring household expenses and turns a
//! calendar month of entries into categorized, totaled CSV and HTML reports.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod format;
pub mod lookup;
pub mod month;
pub mod recurring;
pub mod report;
pub mod store;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("pennybook=info".parse().expect("static directive"));
        fmt().with_env_filter(filter).init();
        tracing::info!("Pennybook tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
