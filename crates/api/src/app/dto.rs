use serde::{Deserialize, Serialize};
use serde_json::json;

use dzcart_cart::{Cart, CartItem};
use dzcart_delivery::ShipmentRequest;
use dzcart_orders::Order;

/// Body of `POST /carts/:user/merge`: the guest lines from the device.
#[derive(Debug, Deserialize)]
pub struct MergeCartRequest {
    pub items: Vec<CartItem>,
}

/// Body of `POST /orders/plan-shipments`.
#[derive(Debug, Deserialize)]
pub struct PlanShipmentsRequest {
    pub order: Order,
}

/// One planned provider submission plus whether it may actually be sent.
#[derive(Debug, Serialize)]
pub struct PlannedShipment {
    pub request: ShipmentRequest,
    pub submittable: bool,
}

pub fn cart_to_json(cart: &Cart) -> serde_json::Value {
    json!({
        "id": cart.cart_id().map(|id| id.to_string()),
        "user_id": cart.user_id().map(|id| id.to_string()),
        "items": cart.items(),
        "total": cart.total(),
    })
}
