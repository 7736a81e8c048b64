use crate::domain::account::AccountId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Table of per-account write locks.
///
/// A transfer takes both accounts' locks before touching either balance,
/// always in ascending identifier order, so two opposing transfers over the
/// same pair cannot deadlock. Read-only operations never touch this table.
#[derive(Default)]
pub(crate) struct AccountLocks {
    slots: Mutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, id: AccountId) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().await;
        slots.entry(id).or_default().clone()
    }

    /// Acquires both locks in ascending id order and holds them until the
    /// returned guards drop.
    pub async fn lock_pair(
        &self,
        a: AccountId,
        b: AccountId,
    ) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        debug_assert_ne!(a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let first = self.slot(lo).await.lock_owned().await;
        let second = self.slot(hi).await.lock_owned().await;
        (first, second)
    }
}
