use crate::account::Account;
use crate::registry::Ledger;

/// Result of replaying one account's history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub account: String,
    pub record_count: u64,
    /// Every record's resulting balance matches the running replay.
    pub replay_consistent: bool,
    /// The replay ends at the account's current balance.
    pub balance_matches: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific inconsistency found during replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Position in the history; `None` for account-level violations.
    pub index: Option<usize>,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    BalanceMismatch,
    FinalBalanceMismatch,
    ReplayOverflow,
    NegativeBalance,
}

/// Replays histories from zero and checks them against recorded balances.
pub struct HistoryValidator;

impl HistoryValidator {
    pub fn validate_account(account: &Account) -> ValidationReport {
        let history = account.history();
        let mut violations = Vec::new();
        let mut replay_consistent = true;
        let mut running: i64 = 0;

        for (index, record) in history.iter().enumerate() {
            running = match running.checked_add(record.amount) {
                Some(next) => next,
                None => {
                    replay_consistent = false;
                    violations.push(Violation {
                        index: Some(index),
                        kind: ViolationKind::ReplayOverflow,
                        description: format!(
                            "adding {} to running balance {running} overflows",
                            record.amount
                        ),
                    });
                    // Resync so one bad record reports once.
                    record.balance
                }
            };

            if record.balance != running {
                replay_consistent = false;
                violations.push(Violation {
                    index: Some(index),
                    kind: ViolationKind::BalanceMismatch,
                    description: format!(
                        "record says balance {}, replay gives {running}",
                        record.balance
                    ),
                });
                running = record.balance;
            }

            // Withdrawals never overdraw, so a negative balance was forged.
            if running < 0 {
                violations.push(Violation {
                    index: Some(index),
                    kind: ViolationKind::NegativeBalance,
                    description: format!("balance drops to {running}"),
                });
            }
        }

        let expected = history.last().map_or(0, |r| r.balance);
        let balance_matches = expected == account.balance();
        if !balance_matches {
            violations.push(Violation {
                index: None,
                kind: ViolationKind::FinalBalanceMismatch,
                description: format!(
                    "account balance {} but history ends at {expected}",
                    account.balance()
                ),
            });
        }

        ValidationReport {
            account: account.name().to_string(),
            record_count: history.len() as u64,
            replay_consistent,
            balance_matches,
            violations,
        }
    }

    /// Validate every account, sorted by name.
    pub fn validate_ledger(ledger: &Ledger) -> Vec<ValidationReport> {
        let mut reports: Vec<ValidationReport> =
            ledger.accounts().map(Self::validate_account).collect();
        reports.sort_by(|a, b| a.account.cmp(&b.account));
        reports
    }
}
