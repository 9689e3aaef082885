//! Guest-to-account cart reconciliation.

use thiserror::Error;

use dzcart_account::{AccountError, AccountStore};
use dzcart_cart::{merge_items, Cart, CartItem};
use dzcart_core::UserId;
use dzcart_store::{read_record, DeviceStore, StoreError, StoreKey};

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Merges a device's guest cart into the account cart at sign-in.
///
/// Ordering is the whole contract:
/// 1. fetch the account cart; any failure aborts before anything is touched
///    (fail closed, guest data intact);
/// 2. read the guest lines once, before any await-side write (a corrupt guest
///    record reads as empty and is discarded by the store layer);
/// 3. persist the merged lines in a single upsert;
/// 4. only after that write succeeds, clear the guest record immediately,
///    so a second reconcile cannot double-count.
pub struct CartReconciler<A, D> {
    account: A,
    device: D,
}

impl<A, D> CartReconciler<A, D>
where
    A: AccountStore,
    D: DeviceStore,
{
    pub fn new(account: A, device: D) -> Self {
        Self { account, device }
    }

    /// Load the user's cart, folding in any guest lines from this device.
    ///
    /// Returns the persisted cart with a definite id and user id.
    pub async fn reconcile(&self, user: UserId) -> Result<Cart, ReconcileError> {
        let remote = self.account.fetch_cart(user).await?;

        let guest_items: Vec<CartItem> =
            read_record(&self.device, StoreKey::GuestCart).unwrap_or_default();

        if guest_items.is_empty() {
            // Nothing to merge. An account that has never had a cart still
            // gets one, so callers always see a persisted cart.
            return match remote {
                Some(cart) => Ok(cart),
                None => Ok(self.account.save_cart(user, Vec::new()).await?),
            };
        }

        let guest_count = guest_items.len();
        let remote_items = remote.map(Cart::into_items).unwrap_or_default();
        let merged = merge_items(remote_items, guest_items);

        let cart = self.account.save_cart(user, merged).await?;

        // The guest record must go the moment the merge is durable, not when
        // the caller gets around to observing the result.
        self.device.remove(StoreKey::GuestCart)?;

        tracing::info!(%user, guest_lines = guest_count, "merged guest cart into account cart");
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use dzcart_account::MemoryAccountStore;
    use dzcart_catalog::{ProductId, ProductSnapshot};
    use dzcart_core::EntityId;
    use dzcart_store::{write_record, MemoryStore};

    fn item(product_id: ProductId, quantity: u32, unit_price: u64) -> CartItem {
        CartItem::new(
            product_id,
            quantity,
            unit_price,
            ProductSnapshot {
                name: "thing".to_string(),
                image_urls: vec![],
            },
        )
        .unwrap()
    }

    fn seed_guest_cart(device: &MemoryStore, items: &Vec<CartItem>) {
        write_record(device, StoreKey::GuestCart, items).unwrap();
    }

    /// Account store wrapper that counts writes and can fail fetches.
    struct InstrumentedStore {
        inner: MemoryAccountStore,
        saves: AtomicUsize,
        fail_fetch: AtomicBool,
    }

    impl InstrumentedStore {
        fn new() -> Self {
            Self {
                inner: MemoryAccountStore::new(),
                saves: AtomicUsize::new(0),
                fail_fetch: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl AccountStore for InstrumentedStore {
        async fn fetch_cart(&self, user: UserId) -> Result<Option<Cart>, AccountError> {
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(AccountError::Network("connection refused".to_string()));
            }
            self.inner.fetch_cart(user).await
        }

        async fn save_cart(&self, user: UserId, items: Vec<CartItem>) -> Result<Cart, AccountError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save_cart(user, items).await
        }

        async fn fetch_addresses(
            &self,
            user: UserId,
        ) -> Result<Vec<dzcart_delivery::Address>, AccountError> {
            self.inner.fetch_addresses(user).await
        }

        async fn save_address(
            &self,
            user: UserId,
            address: dzcart_delivery::Address,
        ) -> Result<dzcart_delivery::Address, AccountError> {
            self.inner.save_address(user, address).await
        }

        async fn delete_address(&self, user: UserId, index: usize) -> Result<(), AccountError> {
            self.inner.delete_address(user, index).await
        }
    }

    #[tokio::test]
    async fn quantities_accumulate_and_newcomers_append() {
        let a = ProductId::new(EntityId::new());
        let b = ProductId::new(EntityId::new());
        let user = UserId::new();

        let account = Arc::new(InstrumentedStore::new());
        account.inner.save_cart(user, vec![item(a, 2, 100)]).await.unwrap();
        account.saves.store(0, Ordering::SeqCst);

        let device = Arc::new(MemoryStore::new());
        seed_guest_cart(&device, &vec![item(a, 3, 100), item(b, 1, 50)]);

        let reconciler = CartReconciler::new(account.clone(), device.clone());
        let cart = reconciler.reconcile(user).await.unwrap();

        assert!(cart.cart_id().is_some());
        assert_eq!(cart.user_id(), Some(user));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].product_id, a);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.items()[1].product_id, b);
        assert_eq!(cart.items()[1].quantity, 1);
    }

    #[tokio::test]
    async fn merge_is_at_most_once() {
        let a = ProductId::new(EntityId::new());
        let user = UserId::new();

        let account = Arc::new(InstrumentedStore::new());
        let device = Arc::new(MemoryStore::new());
        seed_guest_cart(&device, &vec![item(a, 3, 100)]);

        let reconciler = CartReconciler::new(account.clone(), device.clone());

        let first = reconciler.reconcile(user).await.unwrap();
        assert_eq!(first.items()[0].quantity, 3);
        assert_eq!(account.saves.load(Ordering::SeqCst), 1);
        // Guest record cleared by the successful merge.
        assert!(device.get(StoreKey::GuestCart).unwrap().is_none());

        let second = reconciler.reconcile(user).await.unwrap();
        assert_eq!(second.items()[0].quantity, 3);
        // No second write: nothing left to merge.
        assert_eq!(account.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_account_cart_is_created_not_an_error() {
        let a = ProductId::new(EntityId::new());
        let user = UserId::new();

        let account = Arc::new(InstrumentedStore::new());
        let device = Arc::new(MemoryStore::new());
        seed_guest_cart(&device, &vec![item(a, 2, 100)]);

        let reconciler = CartReconciler::new(account.clone(), device.clone());
        let cart = reconciler.reconcile(user).await.unwrap();

        assert!(cart.cart_id().is_some());
        assert_eq!(cart.items().len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_fails_closed_and_keeps_guest_data() {
        let a = ProductId::new(EntityId::new());
        let user = UserId::new();

        let account = Arc::new(InstrumentedStore::new());
        account.fail_fetch.store(true, Ordering::SeqCst);

        let device = Arc::new(MemoryStore::new());
        seed_guest_cart(&device, &vec![item(a, 2, 100)]);

        let reconciler = CartReconciler::new(account.clone(), device.clone());
        let err = reconciler.reconcile(user).await.unwrap_err();

        assert!(matches!(err, ReconcileError::Account(AccountError::Network(_))));
        // No write happened and the guest record is still there.
        assert_eq!(account.saves.load(Ordering::SeqCst), 0);
        assert!(device.get(StoreKey::GuestCart).unwrap().is_some());
    }

    #[tokio::test]
    async fn corrupt_guest_record_reads_as_empty_and_is_removed() {
        let user = UserId::new();

        let account = Arc::new(InstrumentedStore::new());
        let device = Arc::new(MemoryStore::new());
        device
            .put(StoreKey::GuestCart, "{definitely not json".to_string())
            .unwrap();

        let reconciler = CartReconciler::new(account.clone(), device.clone());
        let cart = reconciler.reconcile(user).await.unwrap();

        assert!(cart.is_empty());
        // One write: the empty cart creation, not a merge of garbage.
        assert_eq!(account.saves.load(Ordering::SeqCst), 1);
        assert!(device.get(StoreKey::GuestCart).unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_guest_cart_returns_existing_account_cart_untouched() {
        let a = ProductId::new(EntityId::new());
        let user = UserId::new();

        let account = Arc::new(InstrumentedStore::new());
        account.inner.save_cart(user, vec![item(a, 4, 100)]).await.unwrap();
        account.saves.store(0, Ordering::SeqCst);

        let device = Arc::new(MemoryStore::new());

        let reconciler = CartReconciler::new(account.clone(), device.clone());
        let cart = reconciler.reconcile(user).await.unwrap();

        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(account.saves.load(Ordering::SeqCst), 0);
    }
}
