use super::account::{Account, AccountId};
use super::pix::PixKey;
use super::statement::StatementEntry;
use crate::error::StorageError;
use async_trait::async_trait;
use std::sync::Arc;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Shared handle to the process-wide storage backend, opened at startup and
/// injected into each component.
pub type LedgerStoreHandle = Arc<dyn LedgerStore>;

/// Abstract record store backing the ledger.
///
/// Accounts, statement entries and pix keys live behind this port; the
/// application layer never learns which engine holds them. Mutations that
/// must land together go through a [`StoreTx`] unit of work; everything else
/// is a standalone operation.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Opens a unit of work. Staged writes become visible all at once on
    /// [`StoreTx::commit`]; dropping the unit of work discards them.
    async fn begin(&self) -> StorageResult<Box<dyn StoreTx>>;

    async fn fetch_account(&self, id: AccountId) -> StorageResult<Option<Account>>;

    /// Provisioning hook for the external registration collaborator.
    /// Returns `false` when the identifier is already taken.
    async fn insert_account(&self, account: Account) -> StorageResult<bool>;

    /// Statement entries for one account, newest first. Empty for an account
    /// with no history.
    async fn list_entries(&self, account: AccountId) -> StorageResult<Vec<StatementEntry>>;

    /// Claims an alias if and only if no other row holds it. The check and
    /// the insert are a single atomic step, so two concurrent claims of one
    /// alias cannot both return `true`.
    async fn insert_alias(&self, alias: &PixKey, owner: AccountId) -> StorageResult<bool>;

    /// Removes an alias when it is held by `owner`. Returns `false` when no
    /// row matches both.
    async fn remove_alias(&self, alias: &str, owner: AccountId) -> StorageResult<bool>;

    async fn resolve_alias(&self, alias: &str) -> StorageResult<Option<AccountId>>;

    async fn list_aliases(&self, owner: AccountId) -> StorageResult<Vec<PixKey>>;
}

/// A caller-scoped atomic unit of work spanning account balances and the
/// statement journal.
///
/// Writes are staged in memory and applied by [`commit`](Self::commit) in one
/// atomic step; a reader never observes a partially applied unit. Dropping
/// the value without committing aborts it, leaving no trace.
#[async_trait]
pub trait StoreTx: Send {
    /// Reads an account, observing writes already staged in this unit.
    async fn fetch_account(&mut self, id: AccountId) -> StorageResult<Option<Account>>;

    /// Stages an account write.
    fn put_account(&mut self, account: Account);

    /// Stages a journal append. Pure insert; entries are never updated or
    /// deleted.
    fn append_entry(&mut self, entry: StatementEntry);

    /// Applies every staged write atomically.
    async fn commit(self: Box<Self>) -> StorageResult<()>;
}
