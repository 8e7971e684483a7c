//! In-process account ledger.
//!
//! This crate provides:
//! - [`Account`] with its append-only [`HistoryRecord`] log
//! - the [`Ledger`] registry that owns accounts by unique name
//! - transaction operations ([`ops::deposit`], [`ops::withdraw`],
//!   [`ops::transfer`]) that either fully apply or change nothing
//! - [`HistoryReader`], a single-pass cursor over an account's history
//! - [`HistoryValidator`], which replays histories against balances
//!
//! Nothing here locks. Mutation goes through `&mut`, so sharing a ledger
//! across threads means wrapping it in a mutex.

pub mod account;
pub mod error;
pub mod history;
pub mod ops;
pub mod registry;
pub mod validation;

pub use account::{Account, HistoryRecord};
pub use error::{LedgerError, Result};
pub use history::{HistoryEntry, HistoryReader};
pub use registry::Ledger;
pub use validation::{HistoryValidator, ValidationReport, Violation, ViolationKind};
