use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::snapshot::LedgerSnapshot;
use crate::traits::SnapshotStore;

/// Snapshot kept in a single file.
///
/// Saves go to a temporary file in the same directory which is then renamed
/// over the destination, so readers see either the old or the new snapshot.
#[derive(Clone, Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
    sync_on_save: bool,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync_on_save: false,
        }
    }

    /// `fsync` the snapshot before it replaces the old one.
    pub fn with_sync(mut self, sync_on_save: bool) -> Self {
        self.sync_on_save = sync_on_save;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, snapshot: &LedgerSnapshot) -> StoreResult<()> {
        let bytes = snapshot.encode()?;

        let dir = self.directory();
        fs::create_dir_all(dir)?;

        // Dropping the temp file on any early return removes it.
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        file.flush()?;
        if self.sync_on_save {
            file.as_file().sync_all()?;
        }
        file.persist(&self.path)
            .map_err(|e| StoreError::Persist(e.error))?;

        info!(
            path = %self.path.display(),
            accounts = snapshot.len(),
            bytes = bytes.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn load(&self) -> StoreResult<Option<LedgerSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot file; starting empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot = LedgerSnapshot::decode(&bytes)?;
        info!(
            path = %self.path.display(),
            accounts = snapshot.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }
}
