//! `dzcart-catalog` — products and categories.
//!
//! The catalog is the source of the denormalized snapshots carried on cart and
//! order lines (a line keeps the name/images/weight it was sold with, not a
//! live reference).

pub mod category;
pub mod product;

pub use category::{Category, CategoryId};
pub use product::{LineSnapshot, Product, ProductId, ProductSnapshot, ProductStatus};
