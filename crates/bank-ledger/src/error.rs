/// Errors produced by ledger operations.
///
/// Failed mutations never touch account state, so every variant that can
/// come out of a transaction carries the balance still in force.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("account '{name}' does not exist")]
    NotFound { name: String },

    #[error("amount must not be negative, but is {amount} (balance {balance})")]
    InvalidAmount { amount: i64, balance: i64 },

    #[error("amount {requested} exceeds available balance {available}")]
    InsufficientFunds { requested: i64, available: i64 },

    #[error("applying {amount} to balance {balance} overflows")]
    Overflow { balance: i64, amount: i64 },

    #[error("history reader called after its last record")]
    HistoryExhausted,
}

impl LedgerError {
    /// Balance that remains in force after the failed operation, if the
    /// error came out of a transaction.
    pub fn balance(&self) -> Option<i64> {
        match self {
            Self::InvalidAmount { balance, .. } | Self::Overflow { balance, .. } => Some(*balance),
            Self::InsufficientFunds { available, .. } => Some(*available),
            Self::NotFound { .. } | Self::HistoryExhausted => None,
        }
    }
}

/// Convenience alias used throughout the ledger crate.
pub type Result<T> = std::result::Result<T, LedgerError>;
