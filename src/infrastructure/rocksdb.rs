use crate::domain::account::{Account, AccountId};
use crate::domain::pix::PixKey;
use crate::domain::ports::{LedgerStore, StorageResult, StoreTx};
use crate::domain::statement::StatementEntry;
use crate::error::StorageError;
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options, WriteBatch};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Column Family for account records.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family for statement entries.
pub const CF_STATEMENT: &str = "statement";
/// Column Family for pix key rows.
pub const CF_ALIASES: &str = "aliases";

/// Persistent storage backend using RocksDB.
///
/// Accounts, statement entries and pix keys live in separate Column
/// Families. Units of work commit through a single `WriteBatch`, which
/// RocksDB applies atomically.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
    // Tie-breaker for statement keys sharing a timestamp.
    seq: Arc<AtomicU64>,
    // Serializes check-then-insert on the alias column family.
    alias_guard: Arc<Mutex<()>>,
}

impl RocksDbLedger {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default()),
            ColumnFamilyDescriptor::new(CF_STATEMENT, Options::default()),
            ColumnFamilyDescriptor::new(CF_ALIASES, Options::default()),
        ];
        let db = DB::open_cf_descriptors(&opts, path, cfs)?;

        Ok(Self {
            db: Arc::new(db),
            seq: Arc::new(AtomicU64::new(0)),
            alias_guard: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> StorageResult<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::Backend(format!("column family {name} not found")))
    }
}

// Statement keys are `account | !timestamp | !seq`, so a forward scan over
// one account's prefix yields entries newest first.
fn entry_key(entry: &StatementEntry, seq: u64) -> [u8; 32] {
    let nanos = entry
        .timestamp
        .timestamp_nanos_opt()
        .unwrap_or(i64::MAX)
        .max(0) as u64;
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(entry.account.as_bytes());
    key[16..24].copy_from_slice(&(u64::MAX - nanos).to_be_bytes());
    key[24..32].copy_from_slice(&(u64::MAX - seq).to_be_bytes());
    key
}

#[async_trait]
impl LedgerStore for RocksDbLedger {
    async fn begin(&self) -> StorageResult<Box<dyn StoreTx>> {
        Ok(Box::new(RocksDbTx {
            store: self.clone(),
            accounts: HashMap::new(),
            entries: Vec::new(),
        }))
    }

    async fn fetch_account(&self, id: AccountId) -> StorageResult<Option<Account>> {
        let cf = self.cf(CF_ACCOUNTS)?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn insert_account(&self, account: Account) -> StorageResult<bool> {
        let cf = self.cf(CF_ACCOUNTS)?;
        if self.db.get_cf(cf, account.id.as_bytes())?.is_some() {
            return Ok(false);
        }
        self.db
            .put_cf(cf, account.id.as_bytes(), serde_json::to_vec(&account)?)?;
        Ok(true)
    }

    async fn list_entries(&self, account: AccountId) -> StorageResult<Vec<StatementEntry>> {
        let cf = self.cf(CF_STATEMENT)?;
        let prefix = account.as_bytes();
        let mut entries = Vec::new();
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(prefix, Direction::Forward));
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(prefix) {
                break;
            }
            entries.push(serde_json::from_slice(&value)?);
        }
        Ok(entries)
    }

    async fn insert_alias(&self, alias: &PixKey, owner: AccountId) -> StorageResult<bool> {
        let cf = self.cf(CF_ALIASES)?;
        let _guard = self.alias_guard.lock().await;
        if self.db.get_cf(cf, alias.as_str())?.is_some() {
            return Ok(false);
        }
        self.db
            .put_cf(cf, alias.as_str(), serde_json::to_vec(&owner)?)?;
        Ok(true)
    }

    async fn remove_alias(&self, alias: &str, owner: AccountId) -> StorageResult<bool> {
        let cf = self.cf(CF_ALIASES)?;
        let _guard = self.alias_guard.lock().await;
        match self.db.get_cf(cf, alias)? {
            Some(bytes) if serde_json::from_slice::<AccountId>(&bytes)? == owner => {
                self.db.delete_cf(cf, alias)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn resolve_alias(&self, alias: &str) -> StorageResult<Option<AccountId>> {
        let cf = self.cf(CF_ALIASES)?;
        match self.db.get_cf(cf, alias)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn list_aliases(&self, owner: AccountId) -> StorageResult<Vec<PixKey>> {
        let cf = self.cf(CF_ALIASES)?;
        let mut aliases = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (key, value) = item?;
            if serde_json::from_slice::<AccountId>(&value)? == owner {
                let raw = String::from_utf8(key.into_vec())
                    .map_err(|e| StorageError::Backend(format!("malformed alias key: {e}")))?;
                aliases.push(PixKey::from_trusted(raw));
            }
        }
        Ok(aliases)
    }
}

/// Buffered unit of work over [`RocksDbLedger`], committed as one
/// `WriteBatch`.
struct RocksDbTx {
    store: RocksDbLedger,
    accounts: HashMap<AccountId, Account>,
    entries: Vec<StatementEntry>,
}

#[async_trait]
impl StoreTx for RocksDbTx {
    async fn fetch_account(&mut self, id: AccountId) -> StorageResult<Option<Account>> {
        if let Some(staged) = self.accounts.get(&id) {
            return Ok(Some(staged.clone()));
        }
        self.store.fetch_account(id).await
    }

    fn put_account(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    fn append_entry(&mut self, entry: StatementEntry) {
        self.entries.push(entry);
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let accounts_cf = self.store.cf(CF_ACCOUNTS)?;
        let statement_cf = self.store.cf(CF_STATEMENT)?;

        let mut batch = WriteBatch::default();
        for (id, account) in &self.accounts {
            batch.put_cf(accounts_cf, id.as_bytes(), serde_json::to_vec(account)?);
        }
        for entry in &self.entries {
            let seq = self.store.seq.fetch_add(1, Ordering::Relaxed);
            batch.put_cf(statement_cf, entry_key(entry, seq), serde_json::to_vec(entry)?);
        }
        self.store.db.write(batch)?;
        Ok(())
    }
}
