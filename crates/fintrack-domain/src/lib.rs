//! fintrack-domain
//!
//! Pure domain models (income, expenses, fixed bills, reserves, periods, money).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod expense;
pub mod fixed_bill;
pub mod income;
pub mod money;
pub mod period;
pub mod record;
pub mod reserve;
pub mod session;

pub use common::*;
pub use expense::*;
pub use fixed_bill::*;
pub use income::*;
pub use money::*;
pub use period::*;
pub use record::*;
pub use reserve::*;
pub use session::*;
