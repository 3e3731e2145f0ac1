use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-account async mutexes.
///
/// Trades and revaluations both read an account, await a quote, then write
/// the account back. Holding the account's guard across that cycle keeps two
/// cycles on the same account from interleaving. Cycles on different
/// accounts never contend.
#[derive(Clone, Default)]
pub struct AccountLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `user_id`'s account.
    pub async fn lock(&self, user_id: &str) -> OwnedMutexGuard<()> {
        // Entries are never evicted; the map holds at most one mutex per user.
        let mutex = self
            .locks
            .entry(user_id.to_string())
            .or_default()
            .clone();
        mutex.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_account_is_exclusive() {
        let locks = AccountLocks::new();
        let guard = locks.lock("alice").await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock("alice").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_accounts_do_not_contend() {
        let locks = AccountLocks::new();
        let _alice = locks.lock("alice").await;
        let bob = tokio::time::timeout(Duration::from_millis(100), locks.lock("bob")).await;
        assert!(bob.is_ok());
    }

    #[tokio::test]
    async fn test_registry_keeps_one_mutex_per_account() {
        let locks = AccountLocks::new();
        drop(locks.lock("alice").await);
        drop(locks.lock("alice").await);
        drop(locks.lock("bob").await);
        assert_eq!(locks.locks.len(), 2);
    }
}
