use crate::error::StoreResult;
use crate::snapshot::LedgerSnapshot;

/// Somewhere a single ledger snapshot can be kept.
///
/// Implementations must satisfy:
/// - `save` replaces any previously saved snapshot as a whole.
/// - `load` returns exactly what the last `save` stored, or `Ok(None)` if
///   nothing has been saved yet.
/// - I/O and decoding errors are propagated, never silently ignored.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, snapshot: &LedgerSnapshot) -> StoreResult<()>;

    fn load(&self) -> StoreResult<Option<LedgerSnapshot>>;
}
