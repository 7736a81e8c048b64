use crate::application::locks::AccountLocks;
use crate::domain::account::{AccountId, Amount, Balance};
use crate::domain::ports::{LedgerStore, LedgerStoreHandle, StoreTx};
use crate::domain::statement::StatementEntry;
use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Returned to the caller when a transfer commits.
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    /// Links the debit and credit statement entries of this transfer.
    pub correlation: Uuid,
    pub timestamp: DateTime<Utc>,
    /// The payer's balance after the transfer.
    pub new_balance: Balance,
}

/// The main entry point for moving value between accounts.
///
/// `TransferEngine` executes each transfer as one atomic unit spanning both
/// balances and both statement entries: everything commits together or
/// nothing does. It owns the per-account lock table that serializes
/// concurrent writers touching the same accounts.
pub struct TransferEngine {
    store: LedgerStoreHandle,
    locks: AccountLocks,
}

impl TransferEngine {
    pub fn new(store: LedgerStoreHandle) -> Self {
        Self {
            store,
            locks: AccountLocks::new(),
        }
    }

    /// Moves `amount` from `from` to `to`, journaling a debit entry for the
    /// payer and a credit entry for the recipient.
    #[tracing::instrument(skip(self, description), err)]
    pub async fn transfer_to_account(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        description: &str,
    ) -> Result<TransferReceipt> {
        let amount = Amount::new(amount)?;
        self.execute(from, to, amount, description, None).await
    }

    /// Resolves `alias` to its owning account and then proceeds exactly like
    /// [`transfer_to_account`](Self::transfer_to_account).
    #[tracing::instrument(skip(self, description), err)]
    pub async fn transfer_by_alias(
        &self,
        from: AccountId,
        alias: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<TransferReceipt> {
        let amount = Amount::new(amount)?;
        let to = self
            .store
            .resolve_alias(alias)
            .await?
            .ok_or_else(|| LedgerError::AliasNotFound(alias.to_string()))?;
        self.execute(from, to, amount, description, Some(alias)).await
    }

    /// Current balance of an account. Not transactional with anything else.
    pub async fn balance(&self, id: AccountId) -> Result<Balance> {
        let account = self
            .store
            .fetch_account(id)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))?;
        Ok(account.balance)
    }

    /// Statement entries for an account, newest first. An account with no
    /// history yields an empty list, not an error.
    pub async fn statement(&self, id: AccountId) -> Result<Vec<StatementEntry>> {
        Ok(self.store.list_entries(id).await?)
    }

    async fn execute(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
        description: &str,
        via_alias: Option<&str>,
    ) -> Result<TransferReceipt> {
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }

        // Both locks before either balance is read, held until commit or
        // abort. `lock_pair` orders the acquisition by ascending id.
        let _guards = self.locks.lock_pair(from, to).await;

        let mut tx = self.store.begin().await.map_err(LedgerError::TransferFailed)?;

        let mut payer = tx
            .fetch_account(from)
            .await
            .map_err(LedgerError::TransferFailed)?
            .ok_or(LedgerError::AccountNotFound(from))?;
        let mut payee = tx
            .fetch_account(to)
            .await
            .map_err(LedgerError::TransferFailed)?
            .ok_or(LedgerError::AccountNotFound(to))?;

        payer.debit(amount)?;
        payee.credit(amount);

        let correlation = Uuid::new_v4();
        let timestamp = Utc::now();
        let receipt_description = match via_alias {
            Some(alias) => format!("Pix received from {from} via {alias}"),
            None => description.to_string(),
        };

        let new_balance = payer.balance;
        tx.put_account(payer);
        tx.put_account(payee);
        tx.append_entry(StatementEntry::debit(
            from,
            timestamp,
            description,
            amount,
            correlation,
        ));
        tx.append_entry(StatementEntry::credit(
            to,
            timestamp,
            receipt_description,
            amount,
            correlation,
        ));
        tx.commit().await.map_err(LedgerError::TransferFailed)?;

        tracing::debug!(%correlation, %from, %to, "transfer committed");
        Ok(TransferReceipt {
            correlation,
            timestamp,
            new_balance,
        })
    }
}
