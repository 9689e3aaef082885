//! `dzcart-orders` — finalized orders and shipment planning.
//!
//! An order carries denormalized lines (name, weight, price at sale time) plus
//! per-line fulfillment state: a `dispatch_ready` eligibility flag and, once
//! submitted to the provider, a tracking number. `plan_shipments` turns the
//! eligible lines into provider payloads.

pub mod fulfillment;
pub mod order;

pub use fulfillment::plan_shipments;
pub use order::{Order, OrderId, OrderLineItem, Tracking};
