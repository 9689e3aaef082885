//! Two-phase optimistic cart mutation.
//!
//! The storefront shows a cart change the instant the shopper makes it, while
//! the account-store call is still in flight. `PendingCart` keeps the
//! confirmed state and the optimistic view apart so a failed remote call rolls
//! the view back instead of leaving it diverged from the server.

use dzcart_cart::{Cart, CartItem};
use dzcart_core::{DomainError, DomainResult};

/// A cart with at most one in-flight mutation.
#[derive(Debug, Clone)]
pub struct PendingCart {
    confirmed: Cart,
    staged: Option<Cart>,
}

impl PendingCart {
    pub fn new(confirmed: Cart) -> Self {
        Self {
            confirmed,
            staged: None,
        }
    }

    /// The state to render: the staged view while a mutation is in flight,
    /// the confirmed state otherwise.
    pub fn view(&self) -> &Cart {
        self.staged.as_ref().unwrap_or(&self.confirmed)
    }

    /// The last state the account store acknowledged.
    pub fn confirmed(&self) -> &Cart {
        &self.confirmed
    }

    pub fn has_pending(&self) -> bool {
        self.staged.is_some()
    }

    /// Stage an optimistic add while the remote call runs.
    ///
    /// One mutation at a time: staging over a pending one is a conflict, not
    /// a queue.
    pub fn stage_add(&mut self, item: CartItem) -> DomainResult<()> {
        if self.staged.is_some() {
            return Err(DomainError::conflict("a cart mutation is already in flight"));
        }

        let mut next = self.confirmed.clone();
        next.add(item);
        self.staged = Some(next);
        Ok(())
    }

    /// The remote call succeeded: the staged view becomes confirmed.
    ///
    /// The account store returns the persisted cart, which may differ from
    /// the optimistic view (id assignment on first save); the server copy
    /// wins.
    pub fn commit(&mut self, persisted: Cart) -> DomainResult<()> {
        if self.staged.take().is_none() {
            return Err(DomainError::invariant("no cart mutation to commit"));
        }
        self.confirmed = persisted;
        Ok(())
    }

    /// The remote call failed: drop the staged view, confirmed state stands.
    pub fn roll_back(&mut self) -> DomainResult<()> {
        if self.staged.take().is_none() {
            return Err(DomainError::invariant("no cart mutation to roll back"));
        }
        Ok(())
    }
}
