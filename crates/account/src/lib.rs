//! `dzcart-account` — the account store.
//!
//! Server-side persistence for an authenticated user's cart and addresses,
//! behind a trait so the checkout pipeline can run against the real HTTP
//! backend or an in-memory double.

pub mod http;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use dzcart_cart::{Cart, CartItem};
use dzcart_core::UserId;
use dzcart_delivery::Address;

pub use http::HttpAccountStore;
pub use memory::MemoryAccountStore;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("network error: {0}")]
    Network(String),
    #[error("account API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Server-side cart and address persistence for one account.
///
/// "No cart yet" is not an error: `fetch_cart` returns `Ok(None)` and
/// `save_cart` creates the record. Every other failure is surfaced typed so
/// callers can fail closed.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// The user's persisted cart, or `None` if they never had one.
    async fn fetch_cart(&self, user: UserId) -> Result<Option<Cart>, AccountError>;

    /// Replace the user's cart items in a single upsert.
    ///
    /// Returns the persisted cart with a definite id and user id.
    async fn save_cart(&self, user: UserId, items: Vec<CartItem>) -> Result<Cart, AccountError>;

    async fn fetch_addresses(&self, user: UserId) -> Result<Vec<Address>, AccountError>;

    async fn save_address(&self, user: UserId, address: Address) -> Result<Address, AccountError>;

    async fn delete_address(&self, user: UserId, index: usize) -> Result<(), AccountError>;
}

#[async_trait]
impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    async fn fetch_cart(&self, user: UserId) -> Result<Option<Cart>, AccountError> {
        (**self).fetch_cart(user).await
    }

    async fn save_cart(&self, user: UserId, items: Vec<CartItem>) -> Result<Cart, AccountError> {
        (**self).save_cart(user, items).await
    }

    async fn fetch_addresses(&self, user: UserId) -> Result<Vec<Address>, AccountError> {
        (**self).fetch_addresses(user).await
    }

    async fn save_address(&self, user: UserId, address: Address) -> Result<Address, AccountError> {
        (**self).save_address(user, address).await
    }

    async fn delete_address(&self, user: UserId, index: usize) -> Result<(), AccountError> {
        (**self).delete_address(user, index).await
    }
}
