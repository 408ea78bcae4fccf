#![doc(test(attr(deny(warnings))))]

//! Expense tracker keeping day, week, month and year spending totals that roll over
//! as calendar boundaries pass, backed by a small JSON record on disk.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense tracker tracing initialized.");
    });
}
