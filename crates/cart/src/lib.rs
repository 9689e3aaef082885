//! `dzcart-cart` — cart value types and merge semantics.
//!
//! A cart is owned by the browser session until an authenticated identity
//! exists; `merge_items` is the pure half of that ownership transfer. The
//! orchestration (fetch, persist, clear the device copy) lives in
//! `dzcart-checkout`.

pub mod cart;
pub mod item;

pub use cart::{merge_items, Cart, CartId};
pub use item::CartItem;
