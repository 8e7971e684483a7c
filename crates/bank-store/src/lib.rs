//! Whole-ledger snapshot persistence.
//!
//! A snapshot is the complete state of a [`Ledger`](bank_ledger::Ledger):
//! every account, its balance, and its full ordered history. There is no
//! transaction log; each save replaces the previous snapshot.
//!
//! # Storage Backends
//!
//! All backends implement the [`SnapshotStore`] trait:
//!
//! - [`FileSnapshotStore`] -- single file, replaced atomically on save
//! - [`InMemorySnapshotStore`] -- encoded bytes in memory for tests and embedding

pub mod error;
pub mod file;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use snapshot::{LedgerSnapshot, FORMAT_VERSION, HEADER_SIZE, MAGIC};
pub use traits::SnapshotStore;
