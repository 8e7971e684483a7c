use std::collections::HashSet;

use bank_ledger::{Account, Ledger};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Leading bytes of every snapshot.
pub const MAGIC: [u8; 8] = *b"BANKSNAP";

/// Current snapshot format version.
pub const FORMAT_VERSION: u16 = 1;

/// Magic + version + payload length + CRC.
pub const HEADER_SIZE: usize = 8 + 2 + 4 + 4;

/// Full state of a ledger at one point in time.
///
/// Encoded form:
/// ```text
/// [8 bytes: magic b"BANKSNAP"]
/// [2 bytes: format version (little-endian u16)]
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized LedgerSnapshot)]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    accounts: Vec<Account>,
}

impl LedgerSnapshot {
    /// Copy every account out of `ledger`, sorted by name so equal ledgers
    /// encode to equal bytes.
    pub fn capture(ledger: &Ledger) -> Self {
        let mut accounts: Vec<Account> = ledger.accounts().cloned().collect();
        accounts.sort_by(|a, b| a.name().cmp(b.name()));
        Self { accounts }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Replace everything `ledger` holds with this snapshot's accounts.
    pub fn restore_into(self, ledger: &mut Ledger) {
        ledger.replace_all(self.accounts);
    }

    pub fn into_ledger(self) -> Ledger {
        self.accounts.into_iter().collect()
    }

    /// Serialize and frame.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        let payload =
            bincode::serialize(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let length = u32::try_from(payload.len()).map_err(|_| {
            StoreError::Serialization(format!("payload of {} bytes is too large", payload.len()))
        })?;
        let crc = crc32fast::hash(&payload);

        let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes.extend_from_slice(&crc.to_le_bytes());
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Check the frame and deserialize the payload.
    pub fn decode(bytes: &[u8]) -> StoreResult<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(StoreError::corrupt(format!(
                "{} bytes is shorter than the {HEADER_SIZE}-byte header",
                bytes.len()
            )));
        }
        let (header, payload) = bytes.split_at(HEADER_SIZE);

        if header[..8] != MAGIC {
            return Err(StoreError::corrupt("bad magic"));
        }

        let version = u16::from_le_bytes([header[8], header[9]]);
        if version != FORMAT_VERSION {
            return Err(StoreError::corrupt(format!(
                "unsupported format version {version}"
            )));
        }

        let length = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);
        if length as usize != payload.len() {
            return Err(StoreError::corrupt(format!(
                "header declares {length} payload bytes, found {}",
                payload.len()
            )));
        }

        let expected_crc = u32::from_le_bytes([header[14], header[15], header[16], header[17]]);
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(StoreError::corrupt(format!(
                "CRC mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"
            )));
        }

        let snapshot: Self =
            bincode::deserialize(payload).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut names = HashSet::with_capacity(snapshot.accounts.len());
        for account in &snapshot.accounts {
            if !names.insert(account.name()) {
                return Err(StoreError::corrupt(format!(
                    "account '{}' appears more than once",
                    account.name()
                )));
            }
        }
        Ok(snapshot)
    }
}
