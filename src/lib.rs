#![doc(test(attr(deny(warnings))))]

//! fintrack: a personal finance tracker.
//!
//! Resolves a period filter to a date range, loads the user's income,
//! expenses, active fixed bills and reserves for it, and reduces them to a
//! summary. The crates under `crates/` hold the domain, the core services,
//! configuration and JSON persistence; this crate wires them into
//! [`FinanceTracker`] and the `fintrack_cli` binary.

pub mod app;
pub mod cli;
pub mod currency;
pub mod errors;
pub mod utils;

pub use app::FinanceTracker;
pub use errors::AppError;
pub use fintrack_config;
pub use fintrack_core;
pub use fintrack_domain;
pub use fintrack_storage_json;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("fintrack tracing initialized");
    });
}
