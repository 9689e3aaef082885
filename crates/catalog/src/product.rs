use serde::{Deserialize, Serialize};

use dzcart_core::{DomainError, DomainResult, Entity, EntityId, ValueObject};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Active,
    Archived,
}

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    /// Price in smallest currency unit.
    unit_price: u64,
    image_urls: Vec<String>,
    /// Per-unit weight in grams, when the merchant recorded one.
    weight_grams: Option<u32>,
    status: ProductStatus,
}

impl Product {
    pub fn new(
        id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        unit_price: u64,
    ) -> DomainResult<Self> {
        let sku = sku.into();
        let name = name.into();

        if sku.trim().is_empty() {
            return Err(DomainError::validation("sku must not be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }

        Ok(Self {
            id,
            sku,
            name,
            unit_price,
            image_urls: Vec::new(),
            weight_grams: None,
            status: ProductStatus::Draft,
        })
    }

    pub fn with_images(mut self, image_urls: Vec<String>) -> Self {
        self.image_urls = image_urls;
        self
    }

    pub fn with_weight_grams(mut self, weight_grams: u32) -> Self {
        self.weight_grams = Some(weight_grams);
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    pub fn weight_grams(&self) -> Option<u32> {
        self.weight_grams
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.status == ProductStatus::Archived {
            return Err(DomainError::invariant("archived products cannot be activated"));
        }
        self.status = ProductStatus::Active;
        Ok(())
    }

    pub fn archive(&mut self) {
        self.status = ProductStatus::Archived;
    }

    /// Check if product can be sold (must be Active, not Archived).
    pub fn can_be_sold(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// Denormalized view carried on cart lines.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.name.clone(),
            image_urls: self.image_urls.clone(),
        }
    }

    /// Denormalized view carried on order lines (shipment planning needs weight).
    pub fn line_snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            name: self.name.clone(),
            weight_grams: self.weight_grams,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// What a cart line remembers about the product it was added from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub image_urls: Vec<String>,
}

impl ValueObject for ProductSnapshot {}

/// What an order line remembers about the product it was sold as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub name: String,
    pub weight_grams: Option<u32>,
}

impl ValueObject for LineSnapshot {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product_id() -> ProductId {
        ProductId::new(EntityId::new())
    }

    #[test]
    fn new_product_starts_as_draft() {
        let product = Product::new(test_product_id(), "SKU-1", "Leather bag", 4500).unwrap();
        assert_eq!(product.status(), ProductStatus::Draft);
        assert!(!product.can_be_sold());
    }

    #[test]
    fn empty_sku_is_rejected() {
        let err = Product::new(test_product_id(), "  ", "Leather bag", 4500).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Product::new(test_product_id(), "SKU-1", "", 4500).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn activated_product_can_be_sold() {
        let mut product = Product::new(test_product_id(), "SKU-1", "Leather bag", 4500).unwrap();
        product.activate().unwrap();
        assert!(product.can_be_sold());
    }

    #[test]
    fn archived_product_cannot_be_reactivated() {
        let mut product = Product::new(test_product_id(), "SKU-1", "Leather bag", 4500).unwrap();
        product.archive();
        let err = product.activate().unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(!product.can_be_sold());
    }

    #[test]
    fn snapshot_carries_name_and_images() {
        let product = Product::new(test_product_id(), "SKU-1", "Leather bag", 4500)
            .unwrap()
            .with_images(vec!["https://cdn.example/bag.jpg".to_string()]);

        let snapshot = product.snapshot();
        assert_eq!(snapshot.name, "Leather bag");
        assert_eq!(snapshot.image_urls.len(), 1);
    }

    #[test]
    fn line_snapshot_carries_weight() {
        let product = Product::new(test_product_id(), "SKU-1", "Leather bag", 4500)
            .unwrap()
            .with_weight_grams(850);

        let snapshot = product.line_snapshot();
        assert_eq!(snapshot.name, "Leather bag");
        assert_eq!(snapshot.weight_grams, Some(850));
    }
}
