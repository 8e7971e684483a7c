use serde::{Deserialize, Serialize};

use crate::history::HistoryReader;

/// One entry in an account's transaction log.
///
/// `amount` is positive for a credit and negative for a debit; `balance` is
/// the account balance immediately after the transaction was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub amount: i64,
    pub balance: i64,
}

impl HistoryRecord {
    pub fn new(amount: i64, balance: i64) -> Self {
        Self { amount, balance }
    }
}

/// A named account with a balance and an append-only transaction log.
///
/// Accounts are owned by a [`Ledger`](crate::Ledger) and only change through
/// [`deposit`](crate::ops::deposit), [`withdraw`](crate::ops::withdraw) and
/// [`transfer`](crate::ops::transfer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    name: String,
    balance: i64,
    history: Vec<HistoryRecord>,
}

impl Account {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: 0,
            history: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        name: impl Into<String>,
        balance: i64,
        history: Vec<HistoryRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            balance,
            history,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Transaction log, oldest first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Most recent transaction, if any.
    pub fn last_record(&self) -> Option<&HistoryRecord> {
        self.history.last()
    }

    /// A fresh single-pass reader over this account's history.
    pub fn history_reader(&self) -> HistoryReader<'_> {
        HistoryReader::new(&self.history)
    }

    /// Set the balance to `new_balance` and log the signed `amount` that got
    /// it there. Callers have already validated the transaction.
    pub(crate) fn apply(&mut self, amount: i64, new_balance: i64) -> i64 {
        self.balance = new_balance;
        self.history.push(HistoryRecord::new(amount, new_balance));
        new_balance
    }
}
