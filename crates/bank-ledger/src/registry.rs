use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::account::Account;
use crate::error::{LedgerError, Result};
use crate::ops;

/// Registry of accounts keyed by unique name.
///
/// The ledger owns every account; callers borrow them. Iteration order is
/// unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account with balance 0 and an empty history.
    ///
    /// An existing account with the same name is replaced and its history
    /// discarded.
    pub fn create_account(&mut self, name: impl Into<String>) -> &mut Account {
        match self.accounts.entry(name.into()) {
            Entry::Occupied(mut slot) => {
                let fresh = Account::new(slot.key().as_str());
                let replaced = slot.insert(fresh);
                warn!(
                    account = replaced.name(),
                    balance = replaced.balance(),
                    records = replaced.history().len(),
                    "account recreated; previous balance and history discarded"
                );
                slot.into_mut()
            }
            Entry::Vacant(slot) => {
                let account = Account::new(slot.key().as_str());
                debug!(account = account.name(), "account created");
                slot.insert(account)
            }
        }
    }

    pub fn account(&self, name: &str) -> Result<&Account> {
        self.accounts.get(name).ok_or_else(|| not_found(name))
    }

    pub fn account_mut(&mut self, name: &str) -> Result<&mut Account> {
        self.accounts.get_mut(name).ok_or_else(|| not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Account names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.accounts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Human-readable listing of every account and its balance.
    pub fn list_accounts(&self) -> String {
        self.to_string()
    }

    pub fn clear(&mut self) {
        self.accounts.clear();
    }

    /// Drop every account held and take ownership of `accounts` instead.
    /// Later duplicates of a name win.
    pub fn replace_all(&mut self, accounts: impl IntoIterator<Item = Account>) {
        self.accounts = accounts
            .into_iter()
            .map(|account| (account.name().to_string(), account))
            .collect();
    }

    pub fn deposit(&mut self, name: &str, amount: i64) -> Result<i64> {
        ops::deposit(self.account_mut(name)?, amount)
    }

    pub fn withdraw(&mut self, name: &str, amount: i64) -> Result<i64> {
        ops::withdraw(self.account_mut(name)?, amount)
    }

    /// Transfer between two named accounts. Both names are resolved before
    /// anything is mutated.
    pub fn transfer(&mut self, from: &str, to: &str, amount: i64) -> Result<(i64, i64)> {
        if from == to {
            return ops::transfer_within(self.account_mut(from)?, amount);
        }

        let mut source = self.accounts.remove(from).ok_or_else(|| not_found(from))?;
        let result = match self.accounts.get_mut(to) {
            Some(destination) => ops::transfer(&mut source, destination, amount),
            None => Err(not_found(to)),
        };
        self.accounts.insert(from.to_string(), source);
        result
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accounts:")?;
        for account in self.accounts.values() {
            writeln!(
                f,
                "Account: {}, balance: {}",
                account.name(),
                account.balance()
            )?;
        }
        Ok(())
    }
}

impl FromIterator<Account> for Ledger {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        let mut ledger = Ledger::new();
        ledger.replace_all(iter);
        ledger
    }
}

fn not_found(name: &str) -> LedgerError {
    LedgerError::NotFound {
        name: name.to_string(),
    }
}
