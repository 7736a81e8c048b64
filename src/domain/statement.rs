use super::account::{AccountId, Amount};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of a transfer an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
}

/// One side of a completed transfer. Entries are immutable once written and
/// are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementEntry {
    pub id: Uuid,
    pub account: AccountId,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub amount: Decimal,
    pub direction: Direction,
    /// Links the debit and credit entries produced by one transfer.
    pub correlation: Uuid,
}

impl StatementEntry {
    fn new(
        account: AccountId,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
        amount: Amount,
        direction: Direction,
        correlation: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            timestamp,
            description: description.into(),
            amount: amount.value(),
            direction,
            correlation,
        }
    }

    /// The payer-side entry of a transfer.
    pub fn debit(
        account: AccountId,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
        amount: Amount,
        correlation: Uuid,
    ) -> Self {
        Self::new(
            account,
            timestamp,
            description,
            amount,
            Direction::Debit,
            correlation,
        )
    }

    /// The recipient-side entry of a transfer.
    pub fn credit(
        account: AccountId,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
        amount: Amount,
        correlation: Uuid,
    ) -> Self {
        Self::new(
            account,
            timestamp,
            description,
            amount,
            Direction::Credit,
            correlation,
        )
    }
}
