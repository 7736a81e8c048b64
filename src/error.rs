use crate::domain::account::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Faults raised by storage adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Codec(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("rocksdb error: {0}")]
    RocksDb(#[from] rocksdb::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Domain-level failures surfaced to callers of the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("cannot transfer to the same account")]
    SelfTransfer,
    #[error("account {0} not found")]
    AccountNotFound(AccountId),
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("pix key {0:?} not found")]
    AliasNotFound(String),
    #[error("pix key must not be empty")]
    InvalidAlias,
    #[error("pix key {0:?} is already registered")]
    DuplicateAlias(String),
    /// The transfer transaction did not commit; neither side was mutated.
    #[error("transfer did not commit: {0}")]
    TransferFailed(#[source] StorageError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
