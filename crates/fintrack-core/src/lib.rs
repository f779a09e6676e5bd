//! fintrack-core
//!
//! Period resolution, ledger aggregation and the record-store contract.
//! Depends on fintrack-domain. No CLI, no terminal I/O, no file formats.

pub mod category_service;
pub mod dashboard_service;
pub mod error;
pub mod ledger_aggregator;
pub mod memory_store;
pub mod period_resolver;
pub mod storage;
pub mod time;

pub use category_service::*;
pub use dashboard_service::*;
pub use error::CoreError;
pub use ledger_aggregator::*;
pub use memory_store::MemoryLedgerStore;
pub use period_resolver::*;
pub use storage::{LedgerStore, RecordBook};
pub use time::{Clock, FixedClock, SystemClock};
