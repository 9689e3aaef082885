//! `dzcart-delivery` — regional delivery provider integration.
//!
//! The provider's address model is wilaya (region) / commune (sub-region), with
//! two delivery modes: home delivery and stop-desk pickup at a provider-operated
//! station. This crate owns the address value type, the provider wire payload,
//! and the HTTP client.

pub mod address;
pub mod client;
pub mod shipment;

pub use address::Address;
pub use client::{CreatedShipment, DeliveryClient, DeliveryError};
pub use shipment::ShipmentRequest;
