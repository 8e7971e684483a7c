use std::sync::RwLock;

use crate::error::StoreResult;
use crate::snapshot::LedgerSnapshot;
use crate::traits::SnapshotStore;

/// Snapshot store that keeps the encoded bytes in memory.
///
/// Intended for tests and embedding. Snapshots go through the same codec as
/// the file store, so corruption and framing behave identically.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    bytes: RwLock<Option<Vec<u8>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.bytes.read().expect("lock poisoned").is_none()
    }

    /// Encoded bytes of the last saved snapshot.
    pub fn raw_bytes(&self) -> Option<Vec<u8>> {
        self.bytes.read().expect("lock poisoned").clone()
    }

    /// Replace the stored bytes verbatim.
    pub fn set_raw_bytes(&self, bytes: Vec<u8>) {
        *self.bytes.write().expect("lock poisoned") = Some(bytes);
    }

    /// Forget the saved snapshot.
    pub fn clear(&self) {
        *self.bytes.write().expect("lock poisoned") = None;
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&self, snapshot: &LedgerSnapshot) -> StoreResult<()> {
        let bytes = snapshot.encode()?;
        *self.bytes.write().expect("lock poisoned") = Some(bytes);
        Ok(())
    }

    fn load(&self) -> StoreResult<Option<LedgerSnapshot>> {
        let guard = self.bytes.read().expect("lock poisoned");
        guard
            .as_deref()
            .map(LedgerSnapshot::decode)
            .transpose()
    }
}

impl std::fmt::Debug for InMemorySnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.raw_bytes().map_or(0, |b| b.len());
        f.debug_struct("InMemorySnapshotStore")
            .field("bytes", &len)
            .finish()
    }
}
