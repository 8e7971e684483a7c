use crate::account::HistoryRecord;
use crate::error::{LedgerError, Result};

/// One step of a [`HistoryReader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub amount: i64,
    pub balance: i64,
    /// `false` on the last record (and on the placeholder for an empty log).
    pub has_more: bool,
}

/// Single-pass forward cursor over an account's history, oldest first.
///
/// A reader is exhausted once it has produced an entry with
/// `has_more == false`; reading again fails with
/// [`LedgerError::HistoryExhausted`]. Start over by asking the account for a
/// new reader.
///
/// An empty history produces a single `(0, 0, false)` entry from
/// [`read`](Self::read). The [`Iterator`] impl yields real records only and
/// shares the same cursor.
#[derive(Clone, Debug)]
pub struct HistoryReader<'a> {
    records: &'a [HistoryRecord],
    cursor: usize,
    exhausted: bool,
}

impl<'a> HistoryReader<'a> {
    pub fn new(records: &'a [HistoryRecord]) -> Self {
        Self {
            records,
            cursor: 0,
            exhausted: false,
        }
    }

    /// Produce the next entry.
    pub fn read(&mut self) -> Result<HistoryEntry> {
        if self.exhausted {
            return Err(LedgerError::HistoryExhausted);
        }

        let Some(record) = self.records.get(self.cursor) else {
            // Only reachable for an empty log: a non-empty one exhausts on
            // its last record.
            self.exhausted = true;
            return Ok(HistoryEntry {
                amount: 0,
                balance: 0,
                has_more: false,
            });
        };

        self.cursor += 1;
        let has_more = self.cursor < self.records.len();
        self.exhausted = !has_more;
        Ok(HistoryEntry {
            amount: record.amount,
            balance: record.balance,
            has_more,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Records not yet produced.
    pub fn remaining(&self) -> usize {
        self.records.len() - self.cursor
    }
}

impl Iterator for HistoryReader<'_> {
    type Item = HistoryEntry;

    fn next(&mut self) -> Option<HistoryEntry> {
        if self.records.is_empty() {
            self.exhausted = true;
            return None;
        }
        self.read().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.exhausted { 0 } else { self.remaining() };
        (n, Some(n))
    }
}
