#![doc(test(attr(deny(warnings))))]

//! Forecast Core projects a day-by-day balance trajectory from recurring
//! expenses, recurring incomes, and manually recorded balance snapshots.

pub mod budget;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Forecast Core tracing initialized.");
    });
}
