use bank_ledger::{Account, HistoryReader, HistoryValidator, Ledger};
use bank_store::{FileSnapshotStore, LedgerSnapshot, SnapshotStore};
use tracing::{info, warn};

use crate::config::BankConfig;
use crate::error::{SdkError, SdkResult};

/// A ledger together with the store it is saved to.
///
/// This is the main entry point for applications: every account operation
/// and both persistence operations go through one `Bank`. It holds no locks;
/// wrap it in a `Mutex` to share it.
pub struct Bank<S: SnapshotStore = FileSnapshotStore> {
    ledger: Ledger,
    store: S,
}

impl Bank<FileSnapshotStore> {
    /// Empty bank saving to the file named in `config`. Nothing is read
    /// until [`load`](Self::load) is called.
    pub fn new(config: &BankConfig) -> Self {
        let store = FileSnapshotStore::new(&config.data_path).with_sync(config.sync_on_save);
        Self::with_store(store)
    }

    /// Build from `config` and restore the last saved snapshot, if any.
    pub fn open(config: &BankConfig) -> SdkResult<Self> {
        let mut bank = Self::new(config);
        bank.load()?;
        Ok(bank)
    }
}

impl<S: SnapshotStore> Bank<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            ledger: Ledger::new(),
            store,
        }
    }

    // ---- Accounts ----

    /// Create an account with balance 0, replacing any account of that name.
    pub fn create_account(&mut self, name: impl Into<String>) -> &mut Account {
        self.ledger.create_account(name)
    }

    pub fn account(&self, name: &str) -> SdkResult<&Account> {
        Ok(self.ledger.account(name)?)
    }

    pub fn account_mut(&mut self, name: &str) -> SdkResult<&mut Account> {
        Ok(self.ledger.account_mut(name)?)
    }

    pub fn list_accounts(&self) -> String {
        self.ledger.list_accounts()
    }

    // ---- Transactions ----

    pub fn deposit(&mut self, name: &str, amount: i64) -> SdkResult<i64> {
        Ok(self.ledger.deposit(name, amount)?)
    }

    pub fn withdraw(&mut self, name: &str, amount: i64) -> SdkResult<i64> {
        Ok(self.ledger.withdraw(name, amount)?)
    }

    pub fn transfer(&mut self, from: &str, to: &str, amount: i64) -> SdkResult<(i64, i64)> {
        Ok(self.ledger.transfer(from, to, amount)?)
    }

    /// Fresh history reader for the named account.
    pub fn history(&self, name: &str) -> SdkResult<HistoryReader<'_>> {
        Ok(self.ledger.account(name)?.history_reader())
    }

    // ---- Persistence ----

    /// Write the whole ledger to the store, replacing the previous snapshot.
    pub fn save(&self) -> SdkResult<()> {
        self.store.save(&LedgerSnapshot::capture(&self.ledger))?;
        Ok(())
    }

    /// Replace the in-memory ledger with the stored snapshot.
    ///
    /// With nothing stored the ledger becomes empty. A snapshot whose
    /// histories do not replay to their balances is rejected and the
    /// in-memory ledger is left as it was.
    pub fn load(&mut self) -> SdkResult<()> {
        let Some(snapshot) = self.store.load()? else {
            self.ledger.clear();
            return Ok(());
        };

        for account in snapshot.accounts() {
            let report = HistoryValidator::validate_account(account);
            if !report.is_valid() {
                warn!(
                    account = %report.account,
                    violations = report.violations.len(),
                    "rejecting inconsistent snapshot"
                );
                return Err(SdkError::InconsistentSnapshot {
                    account: report.account,
                    violations: report.violations.len(),
                });
            }
        }

        info!(accounts = snapshot.len(), "ledger restored");
        snapshot.restore_into(&mut self.ledger);
        Ok(())
    }

    // ---- Accessors ----

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use bank_ledger::{HistoryRecord, LedgerError};
    use bank_store::{InMemorySnapshotStore, StoreError, FORMAT_VERSION, MAGIC};
    use serde::Serialize;

    use super::*;

    fn memory_bank() -> Bank<InMemorySnapshotStore> {
        Bank::with_store(InMemorySnapshotStore::new())
    }

    #[test]
    fn pike_scenario() {
        let mut bank = memory_bank();
        bank.create_account("Pike");

        assert_eq!(bank.deposit("Pike", 100).unwrap(), 100);
        assert_eq!(bank.withdraw("Pike", 42).unwrap(), 58);
        assert_eq!(
            bank.account("Pike").unwrap().history(),
            &[HistoryRecord::new(100, 100), HistoryRecord::new(-42, 58)]
        );

        let err = bank.withdraw("Pike", 1000).unwrap_err();
        assert!(matches!(
            err.as_ledger(),
            Some(LedgerError::InsufficientFunds { requested: 1000, available: 58 })
        ));
        assert_eq!(bank.account("Pike").unwrap().balance(), 58);
    }

    #[test]
    fn transfer_scenario() {
        let mut bank = memory_bank();
        bank.create_account("A");
        bank.create_account("B");
        bank.deposit("A", 100).unwrap();

        assert_eq!(bank.transfer("A", "B", 100).unwrap(), (0, 100));
        assert!(matches!(
            bank.transfer("A", "B", 100),
            Err(SdkError::Ledger(LedgerError::InsufficientFunds { .. }))
        ));
    }

    #[test]
    fn unknown_account_is_ledger_not_found() {
        let bank = memory_bank();
        assert!(matches!(
            bank.account("Nobody"),
            Err(SdkError::Ledger(LedgerError::NotFound { .. }))
        ));
        assert!(bank.history("Nobody").is_err());
    }

    #[test]
    fn history_reader_for_new_account() {
        let mut bank = memory_bank();
        bank.create_account("Empty");
        let mut reader = bank.history("Empty").unwrap();
        let entry = reader.read().unwrap();
        assert_eq!((entry.amount, entry.balance, entry.has_more), (0, 0, false));
        assert!(reader.read().is_err());
    }

    #[test]
    fn save_load_is_identity() {
        let mut bank = memory_bank();
        bank.create_account("Griesemer");
        bank.create_account("Pike");
        bank.create_account("Thompson");
        bank.deposit("Griesemer", 100).unwrap();
        bank.transfer("Griesemer", "Pike", 60).unwrap();
        bank.withdraw("Pike", 15).unwrap();
        bank.deposit("Thompson", 7).unwrap();
        let before = bank.ledger().clone();

        bank.save().unwrap();
        bank.create_account("Transient");
        bank.deposit("Pike", 1).unwrap();

        bank.load().unwrap();
        assert_eq!(bank.ledger(), &before);
        assert!(!bank.ledger().contains("Transient"));
    }

    #[test]
    fn load_without_snapshot_empties_ledger() {
        let mut bank = memory_bank();
        bank.create_account("Someone");
        bank.load().unwrap();
        assert!(bank.ledger().is_empty());
    }

    #[test]
    fn corrupt_snapshot_keeps_ledger() {
        let mut bank = memory_bank();
        bank.create_account("Keep");
        bank.store().set_raw_bytes(vec![0; 32]);

        assert!(matches!(
            bank.load(),
            Err(SdkError::Store(StoreError::Corrupt { .. }))
        ));
        assert!(bank.ledger().contains("Keep"));
    }

    // Mirrors the serialized layout of `LedgerSnapshot` so a test can forge
    // a well-framed snapshot whose history disagrees with its balance.
    #[derive(Serialize)]
    struct RawAccount {
        name: String,
        balance: i64,
        history: Vec<(i64, i64)>,
    }

    #[derive(Serialize)]
    struct RawSnapshot {
        accounts: Vec<RawAccount>,
    }

    fn frame(payload: &[u8]) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn inconsistent_snapshot_is_rejected() {
        let forged = RawSnapshot {
            accounts: vec![RawAccount {
                name: "Mallory".into(),
                balance: 1_000_000,
                history: vec![(10, 10)],
            }],
        };
        let payload = bincode::serialize(&forged).unwrap();

        let mut bank = memory_bank();
        bank.create_account("Honest");
        bank.store().set_raw_bytes(frame(&payload));

        match bank.load() {
            Err(SdkError::InconsistentSnapshot { account, violations }) => {
                assert_eq!(account, "Mallory");
                assert_eq!(violations, 1);
            }
            other => panic!("expected InconsistentSnapshot, got {other:?}"),
        }
        assert!(bank.ledger().contains("Honest"));
        assert!(!bank.ledger().contains("Mallory"));
    }

    #[test]
    fn snapshot_with_repeated_name_is_rejected() {
        let forged = RawSnapshot {
            accounts: vec![
                RawAccount {
                    name: "A".into(),
                    balance: 10,
                    history: vec![(10, 10)],
                },
                RawAccount {
                    name: "A".into(),
                    balance: 5,
                    history: vec![(5, 5)],
                },
            ],
        };

        let mut bank = memory_bank();
        bank.create_account("Honest");
        bank.deposit("Honest", 3).unwrap();
        let before = bank.ledger().clone();
        bank.store()
            .set_raw_bytes(frame(&bincode::serialize(&forged).unwrap()));

        assert!(matches!(
            bank.load(),
            Err(SdkError::Store(StoreError::Corrupt { .. }))
        ));
        assert_eq!(bank.ledger(), &before);
    }

    #[test]
    fn negative_history_snapshot_is_rejected() {
        let forged = RawSnapshot {
            accounts: vec![RawAccount {
                name: "Overdrawn".into(),
                balance: -5,
                history: vec![(-5, -5)],
            }],
        };
        let mut bank = memory_bank();
        bank.store()
            .set_raw_bytes(frame(&bincode::serialize(&forged).unwrap()));

        assert!(matches!(
            bank.load(),
            Err(SdkError::InconsistentSnapshot { ref account, violations: 1 }) if account == "Overdrawn"
        ));
        assert!(bank.ledger().is_empty());
    }

    #[test]
    fn forged_layout_matches_real_snapshot() {
        let honest = RawSnapshot {
            accounts: vec![RawAccount {
                name: "Hiasl".into(),
                balance: 10,
                history: vec![(10, 10)],
            }],
        };
        let mut bank = memory_bank();
        bank.store()
            .set_raw_bytes(frame(&bincode::serialize(&honest).unwrap()));
        bank.load().unwrap();
        assert_eq!(bank.account("Hiasl").unwrap().balance(), 10);
    }

    #[test]
    fn file_bank_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = BankConfig::with_data_path(dir.path().join("bank.data"));

        // First run: nothing on disk yet.
        let mut bank = Bank::open(&config).unwrap();
        assert!(bank.ledger().is_empty());
        bank.create_account("Hiasl");
        bank.deposit("Hiasl", 250).unwrap();
        bank.withdraw("Hiasl", 50).unwrap();
        bank.save().unwrap();
        let saved = bank.ledger().clone();
        drop(bank);

        let reopened = Bank::open(&config).unwrap();
        assert_eq!(reopened.ledger(), &saved);
        assert_eq!(reopened.store().path(), config.data_path.as_path());
        let balances: Vec<i64> = reopened
            .history("Hiasl")
            .unwrap()
            .map(|e| e.balance)
            .collect();
        assert_eq!(balances, vec![250, 200]);
    }

    #[test]
    fn listing_reports_balances() {
        let mut bank = memory_bank();
        bank.create_account("Pike");
        bank.deposit("Pike", 3).unwrap();
        assert_eq!(
            bank.list_accounts(),
            "Accounts:\nAccount: Pike, balance: 3\n"
        );
    }
}
