use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use dzcart_cart::{Cart, CartId, CartItem};
use dzcart_core::{EntityId, UserId};
use dzcart_delivery::Address;

use crate::{AccountError, AccountStore};

/// In-memory account store.
///
/// Backs tests and the API service wiring. Not optimized for performance.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    carts: RwLock<HashMap<UserId, Cart>>,
    addresses: RwLock<HashMap<UserId, Vec<Address>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AccountError {
    AccountError::Api(500, "lock poisoned".to_string())
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn fetch_cart(&self, user: UserId) -> Result<Option<Cart>, AccountError> {
        let carts = self.carts.read().map_err(|_| poisoned())?;
        Ok(carts.get(&user).cloned())
    }

    async fn save_cart(&self, user: UserId, items: Vec<CartItem>) -> Result<Cart, AccountError> {
        let mut carts = self.carts.write().map_err(|_| poisoned())?;

        let id = carts
            .get(&user)
            .and_then(Cart::cart_id)
            .unwrap_or_else(|| CartId::new(EntityId::new()));

        let cart = Cart::for_user(id, user, items)
            .map_err(|e| AccountError::Api(422, e.to_string()))?;
        carts.insert(user, cart.clone());
        Ok(cart)
    }

    async fn fetch_addresses(&self, user: UserId) -> Result<Vec<Address>, AccountError> {
        let addresses = self.addresses.read().map_err(|_| poisoned())?;
        Ok(addresses.get(&user).cloned().unwrap_or_default())
    }

    async fn save_address(&self, user: UserId, address: Address) -> Result<Address, AccountError> {
        let mut addresses = self.addresses.write().map_err(|_| poisoned())?;
        addresses.entry(user).or_default().push(address.clone());
        Ok(address)
    }

    async fn delete_address(&self, user: UserId, index: usize) -> Result<(), AccountError> {
        let mut addresses = self.addresses.write().map_err(|_| poisoned())?;
        let list = addresses
            .get_mut(&user)
            .ok_or_else(|| AccountError::Api(404, "no addresses for user".to_string()))?;

        if index >= list.len() {
            return Err(AccountError::Api(404, "address index out of range".to_string()));
        }

        list.remove(index);
        Ok(())
    }
}
