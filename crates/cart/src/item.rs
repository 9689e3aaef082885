use serde::{Deserialize, Serialize};

use dzcart_catalog::{Product, ProductId, ProductSnapshot};
use dzcart_core::{DomainError, DomainResult, ValueObject};

/// One cart line: product, quantity, unit price, and the snapshot it was added with.
///
/// The snapshot is denormalized: the storefront renders the cart from the
/// line alone, without a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price in smallest currency unit.
    pub unit_price: u64,
    pub snapshot: ProductSnapshot,
}

impl CartItem {
    pub fn new(
        product_id: ProductId,
        quantity: u32,
        unit_price: u64,
        snapshot: ProductSnapshot,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        Ok(Self {
            product_id,
            quantity,
            unit_price,
            snapshot,
        })
    }

    /// Build a line from a catalog product at its current price.
    pub fn from_product(product: &Product, quantity: u32) -> DomainResult<Self> {
        if !product.can_be_sold() {
            return Err(DomainError::validation(format!(
                "product {} is not for sale",
                product.id_typed()
            )));
        }

        Self::new(
            product.id_typed(),
            quantity,
            product.unit_price(),
            product.snapshot(),
        )
    }

    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

impl ValueObject for CartItem {}
