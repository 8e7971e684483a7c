//! High-level bank API.
//!
//! [`Bank`] pairs the account [`Ledger`] with a snapshot store and is the
//! main entry point for applications embedding the ledger.

pub mod bank;
pub mod config;
pub mod error;

pub use bank::Bank;
pub use config::{BankConfig, DEFAULT_DATA_PATH};
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use bank_ledger::{
    Account, HistoryEntry, HistoryReader, HistoryRecord, Ledger, LedgerError,
};
pub use bank_store::{
    FileSnapshotStore, InMemorySnapshotStore, LedgerSnapshot, SnapshotStore, StoreError,
};
