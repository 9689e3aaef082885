//! `dzcart-checkout` — the checkout pipeline head.
//!
//! Four pieces sit between a device's guest data and an account:
//! - [`CartReconciler`] moves guest cart lines into the account cart when a
//!   guest signs in (at-most-once, fail closed),
//! - [`GuestAddressBook`] does the same ownership transfer for addresses,
//! - [`AddressSelector`] keeps the durable "currently selected" shipping
//!   address honest (never incomplete, never stale),
//! - [`PendingCart`] stages optimistic cart mutations so a failed remote call
//!   rolls back instead of leaving divergent state.

pub mod addresses;
pub mod pending;
pub mod reconciler;
pub mod selector;

pub use addresses::GuestAddressBook;
pub use pending::PendingCart;
pub use reconciler::{CartReconciler, ReconcileError};
pub use selector::AddressSelector;
