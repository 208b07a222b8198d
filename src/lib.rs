#![doc(test(attr(deny(warnings))))]

//! Cheque Core implements the business rules around cheque records: the status
//! lifecycle and its invariants, double-entry accounting generation per status, and
//! the bridge that turns a submitted cheque-mode payment entry into a cheque.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::{AccountingService, EntryOutcome, EntryPlan, ServiceError};
pub use crate::core::{ChequeManager, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cheque Core tracing initialized.");
    });
}
