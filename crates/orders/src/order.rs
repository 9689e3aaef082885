use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dzcart_catalog::{Product, ProductId};
use dzcart_core::{DomainError, DomainResult, Entity, EntityId, UserId};
use dzcart_delivery::Address;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Provider-assigned shipment identity for a line that was already submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracking {
    pub tracking_number: String,
}

/// One order line.
///
/// `dispatch_ready` marks the line as eligible for submission to the delivery
/// provider; a line that already carries tracking is never submitted again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price in smallest currency unit.
    pub unit_price: u64,
    pub name: String,
    /// Per-unit weight in grams, when the catalog recorded one.
    pub weight_grams: Option<u32>,
    pub tracking: Option<Tracking>,
    pub dispatch_ready: bool,
}

impl OrderLineItem {
    pub fn new(
        product_id: ProductId,
        quantity: u32,
        unit_price: u64,
        name: impl Into<String>,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        Ok(Self {
            product_id,
            quantity,
            unit_price,
            name: name.into(),
            weight_grams: None,
            tracking: None,
            dispatch_ready: false,
        })
    }

    /// Build a line from a catalog product at its current price, carrying the
    /// recorded weight for shipment planning.
    pub fn from_product(product: &Product, quantity: u32) -> DomainResult<Self> {
        let snapshot = product.line_snapshot();
        let mut line = Self::new(product.id_typed(), quantity, product.unit_price(), snapshot.name)?;
        line.weight_grams = snapshot.weight_grams;
        Ok(line)
    }

    pub fn with_weight_grams(mut self, weight_grams: u32) -> Self {
        self.weight_grams = Some(weight_grams);
        self
    }

    pub fn ready_for_dispatch(mut self) -> Self {
        self.dispatch_ready = true;
        self
    }

    pub fn with_tracking(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking = Some(Tracking {
            tracking_number: tracking_number.into(),
        });
        self
    }

    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }

    /// Eligible for a new provider submission: flagged ready and never tracked.
    pub fn awaiting_dispatch(&self) -> bool {
        self.dispatch_ready && self.tracking.is_none()
    }
}

/// A finalized order.
///
/// Authenticated orders reference one of the account's addresses; guest orders
/// carry the address they were placed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: Option<UserId>,
    address: Option<Address>,
    guest_address: Option<Address>,
    /// Shipping price for the resolved destination, in smallest currency unit.
    shipping_price: u64,
    lines: Vec<OrderLineItem>,
    placed_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: OrderId,
        user_id: Option<UserId>,
        address: Option<Address>,
        guest_address: Option<Address>,
        shipping_price: u64,
        lines: Vec<OrderLineItem>,
        placed_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation("order must have at least one line"));
        }

        Ok(Self {
            id,
            user_id,
            address,
            guest_address,
            shipping_price,
            lines,
            placed_at,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn shipping_price(&self) -> u64 {
        self.shipping_price
    }

    pub fn lines(&self) -> &[OrderLineItem] {
        &self.lines
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Record provider tracking on every line it covers.
    pub fn record_tracking(&mut self, product_ids: &[ProductId], tracking_number: &str) {
        for line in &mut self.lines {
            if product_ids.contains(&line.product_id) {
                line.tracking = Some(Tracking {
                    tracking_number: tracking_number.to_string(),
                });
            }
        }
    }

    /// The destination to ship to: the order's own address, else the guest
    /// address it was placed with, else the empty sentinel.
    pub fn delivery_address(&self) -> Address {
        self.address
            .clone()
            .or_else(|| self.guest_address.clone())
            .unwrap_or_else(Address::empty)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
