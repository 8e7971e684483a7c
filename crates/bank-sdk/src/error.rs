use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("ledger error: {0}")]
    Ledger(#[from] bank_ledger::LedgerError),

    #[error("store error: {0}")]
    Store(#[from] bank_store::StoreError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("snapshot account '{account}' does not replay to its balance ({violations} violation(s))")]
    InconsistentSnapshot { account: String, violations: usize },
}

impl SdkError {
    /// The underlying ledger error, if this is one.
    pub fn as_ledger(&self) -> Option<&bank_ledger::LedgerError> {
        match self {
            Self::Ledger(e) => Some(e),
            _ => None,
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
