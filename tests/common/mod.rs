use async_trait::async_trait;
use pix_ledger::domain::account::{Account, AccountId, Balance};
use pix_ledger::domain::pix::PixKey;
use pix_ledger::domain::ports::{LedgerStore, LedgerStoreHandle, StorageResult, StoreTx};
use pix_ledger::domain::statement::StatementEntry;
use pix_ledger::error::StorageError;
use pix_ledger::infrastructure::in_memory::InMemoryLedger;
use rust_decimal::Decimal;
use std::sync::Arc;

/// In-memory store seeded with the given accounts and balances.
pub async fn seeded_store(seed: &[(AccountId, Decimal)]) -> LedgerStoreHandle {
    let store = InMemoryLedger::new();
    for (id, balance) in seed {
        assert!(
            store
                .insert_account(Account::with_balance(*id, Balance::new(*balance)))
                .await
                .unwrap()
        );
    }
    Arc::new(store)
}

/// Delegates everything to an in-memory ledger but fails every commit,
/// simulating a storage fault at the worst possible moment. `inner` is a
/// shared handle, so tests can inspect the untouched state afterwards.
pub struct FailingLedger {
    pub inner: InMemoryLedger,
}

struct FailingTx {
    inner: Box<dyn StoreTx>,
}

#[async_trait]
impl LedgerStore for FailingLedger {
    async fn begin(&self) -> StorageResult<Box<dyn StoreTx>> {
        Ok(Box::new(FailingTx {
            inner: self.inner.begin().await?,
        }))
    }

    async fn fetch_account(&self, id: AccountId) -> StorageResult<Option<Account>> {
        self.inner.fetch_account(id).await
    }

    async fn insert_account(&self, account: Account) -> StorageResult<bool> {
        self.inner.insert_account(account).await
    }

    async fn list_entries(&self, account: AccountId) -> StorageResult<Vec<StatementEntry>> {
        self.inner.list_entries(account).await
    }

    async fn insert_alias(&self, alias: &PixKey, owner: AccountId) -> StorageResult<bool> {
        self.inner.insert_alias(alias, owner).await
    }

    async fn remove_alias(&self, alias: &str, owner: AccountId) -> StorageResult<bool> {
        self.inner.remove_alias(alias, owner).await
    }

    async fn resolve_alias(&self, alias: &str) -> StorageResult<Option<AccountId>> {
        self.inner.resolve_alias(alias).await
    }

    async fn list_aliases(&self, owner: AccountId) -> StorageResult<Vec<PixKey>> {
        self.inner.list_aliases(owner).await
    }
}

#[async_trait]
impl StoreTx for FailingTx {
    async fn fetch_account(&mut self, id: AccountId) -> StorageResult<Option<Account>> {
        self.inner.fetch_account(id).await
    }

    fn put_account(&mut self, account: Account) {
        self.inner.put_account(account);
    }

    fn append_entry(&mut self, entry: StatementEntry) {
        self.inner.append_entry(entry);
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        Err(StorageError::Backend("injected commit failure".to_string()))
    }
}
