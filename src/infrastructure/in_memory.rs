use crate::domain::account::{Account, AccountId};
use crate::domain::pix::PixKey;
use crate::domain::ports::{LedgerStore, StorageResult, StoreTx};
use crate::domain::statement::StatementEntry;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    // Entries per account in append (chronological) order.
    journal: HashMap<AccountId, Vec<StatementEntry>>,
    aliases: BTreeMap<PixKey, AccountId>,
}

/// A thread-safe in-memory storage backend.
///
/// Uses `Arc<RwLock<State>>` to allow shared concurrent access; `Clone`
/// shares the underlying state. Ideal for tests or ephemeral runs where
/// persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    state: Arc<RwLock<State>>,
}

impl InMemoryLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn begin(&self) -> StorageResult<Box<dyn StoreTx>> {
        Ok(Box::new(InMemoryTx {
            state: Arc::clone(&self.state),
            accounts: HashMap::new(),
            entries: Vec::new(),
        }))
    }

    async fn fetch_account(&self, id: AccountId) -> StorageResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn insert_account(&self, account: Account) -> StorageResult<bool> {
        let mut state = self.state.write().await;
        if state.accounts.contains_key(&account.id) {
            return Ok(false);
        }
        state.accounts.insert(account.id, account);
        Ok(true)
    }

    async fn list_entries(&self, account: AccountId) -> StorageResult<Vec<StatementEntry>> {
        let state = self.state.read().await;
        Ok(state
            .journal
            .get(&account)
            .map(|rows| rows.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_alias(&self, alias: &PixKey, owner: AccountId) -> StorageResult<bool> {
        let mut state = self.state.write().await;
        if state.aliases.contains_key(alias.as_str()) {
            return Ok(false);
        }
        state.aliases.insert(alias.clone(), owner);
        Ok(true)
    }

    async fn remove_alias(&self, alias: &str, owner: AccountId) -> StorageResult<bool> {
        let mut state = self.state.write().await;
        if let Some(held_by) = state.aliases.get(alias).copied()
            && held_by == owner
        {
            state.aliases.remove(alias);
            return Ok(true);
        }
        Ok(false)
    }

    async fn resolve_alias(&self, alias: &str) -> StorageResult<Option<AccountId>> {
        let state = self.state.read().await;
        Ok(state.aliases.get(alias).copied())
    }

    async fn list_aliases(&self, owner: AccountId) -> StorageResult<Vec<PixKey>> {
        let state = self.state.read().await;
        Ok(state
            .aliases
            .iter()
            .filter(|(_, held_by)| **held_by == owner)
            .map(|(alias, _)| alias.clone())
            .collect())
    }
}

/// Buffered unit of work over [`InMemoryLedger`].
struct InMemoryTx {
    state: Arc<RwLock<State>>,
    accounts: HashMap<AccountId, Account>,
    entries: Vec<StatementEntry>,
}

#[async_trait]
impl StoreTx for InMemoryTx {
    async fn fetch_account(&mut self, id: AccountId) -> StorageResult<Option<Account>> {
        if let Some(staged) = self.accounts.get(&id) {
            return Ok(Some(staged.clone()));
        }
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).cloned())
    }

    fn put_account(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    fn append_entry(&mut self, entry: StatementEntry) {
        self.entries.push(entry);
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let Self {
            state,
            accounts,
            entries,
        } = *self;
        // One write-lock swap: readers see every staged write or none.
        let mut state = state.write().await;
        for (id, account) in accounts {
            state.accounts.insert(id, account);
        }
        for entry in entries {
            state.journal.entry(entry.account).or_default().push(entry);
        }
        Ok(())
    }
}
