use serde::{Deserialize, Serialize};

use dzcart_core::{DomainError, DomainResult, Entity, EntityId, UserId};

use crate::item::CartItem;

/// Cart identifier (assigned by the account store on first persistence).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub EntityId);

impl CartId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CartId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A shopping cart.
///
/// Guest carts have neither id nor user: they live only in the device store.
/// Invariant: `product_id` values are unique within `items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    id: Option<CartId>,
    user_id: Option<UserId>,
    items: Vec<CartItem>,
}

impl Cart {
    /// An unpersisted cart owned by the browser session.
    pub fn guest() -> Self {
        Self {
            id: None,
            user_id: None,
            items: Vec::new(),
        }
    }

    /// A persisted cart owned by an account.
    pub fn for_user(id: CartId, user_id: UserId, items: Vec<CartItem>) -> DomainResult<Self> {
        ensure_unique_products(&items)?;
        Ok(Self {
            id: Some(id),
            user_id: Some(user_id),
            items,
        })
    }

    pub fn cart_id(&self) -> Option<CartId> {
        self.id
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item: accumulate quantity on an existing line for the same
    /// product, else append a new line.
    pub fn add(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, product_id: dzcart_catalog::ProductId) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Σ quantity × unit price over all lines, in smallest currency unit.
    pub fn total(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

impl Entity for Cart {
    type Id = Option<CartId>;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Merge guest lines into persisted lines.
///
/// For each guest item: a persisted line with the same `product_id` absorbs the
/// guest quantity (unit price is not re-summed, the persisted price wins);
/// otherwise the guest item is appended verbatim. Persisted order is preserved
/// and guest newcomers keep their relative order.
pub fn merge_items(persisted: Vec<CartItem>, guest: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged = persisted;

    for guest_item in guest {
        match merged
            .iter_mut()
            .find(|existing| existing.product_id == guest_item.product_id)
        {
            Some(existing) => existing.quantity += guest_item.quantity,
            None => merged.push(guest_item),
        }
    }

    merged
}

fn ensure_unique_products(items: &[CartItem]) -> DomainResult<()> {
    for (idx, item) in items.iter().enumerate() {
        if items[..idx]
            .iter()
            .any(|earlier| earlier.product_id == item.product_id)
        {
            return Err(DomainError::invariant(format!(
                "duplicate product in cart: {}",
                item.product_id
            )));
        }
    }
    Ok(())
}
