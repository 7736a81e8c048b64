use crate::domain::account::AccountId;
use crate::domain::pix::PixKey;
use crate::domain::ports::{LedgerStore, LedgerStoreHandle};
use crate::error::{LedgerError, Result};

/// Alias lifecycle management: registering, revoking, resolving and listing
/// pix keys. Independent of transfers; the engine only consults it through
/// the store's resolve primitive.
pub struct PixKeyRegistry {
    store: LedgerStoreHandle,
}

impl PixKeyRegistry {
    pub fn new(store: LedgerStoreHandle) -> Self {
        Self { store }
    }

    /// Claims `alias` for `account`. The underlying insert is atomic with
    /// the uniqueness check, so concurrent claims of the same alias end with
    /// exactly one winner.
    #[tracing::instrument(skip(self), err)]
    pub async fn register(&self, account: AccountId, alias: &str) -> Result<()> {
        let key = PixKey::new(alias)?;
        if self.store.insert_alias(&key, account).await? {
            tracing::debug!(%key, %account, "pix key registered");
            Ok(())
        } else {
            Err(LedgerError::DuplicateAlias(key.into_string()))
        }
    }

    /// Removes `alias` if it is held by `account`. An alias owned by a
    /// different account is reported as not found, never revoked.
    #[tracing::instrument(skip(self), err)]
    pub async fn revoke(&self, account: AccountId, alias: &str) -> Result<()> {
        if self.store.remove_alias(alias, account).await? {
            Ok(())
        } else {
            Err(LedgerError::AliasNotFound(alias.to_string()))
        }
    }

    /// Looks up the account behind `alias`.
    pub async fn resolve(&self, alias: &str) -> Result<AccountId> {
        self.store
            .resolve_alias(alias)
            .await?
            .ok_or_else(|| LedgerError::AliasNotFound(alias.to_string()))
    }

    /// Every alias held by `account`. Order carries no meaning.
    pub async fn list(&self, account: AccountId) -> Result<Vec<PixKey>> {
        Ok(self.store.list_aliases(account).await?)
    }
}
