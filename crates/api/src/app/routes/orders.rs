use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};

use dzcart_orders::plan_shipments;

use crate::app::dto;

pub fn router() -> Router {
    Router::new().route("/plan-shipments", post(plan_order_shipments))
}

/// Plan provider submissions for a finalized order.
///
/// Pure planning: nothing is sent to the provider here. Each planned request
/// is returned with its submittability so the back office can refuse to
/// dispatch sentinel-address orders.
pub async fn plan_order_shipments(
    Json(body): Json<dto::PlanShipmentsRequest>,
) -> axum::response::Response {
    let planned: Vec<dto::PlannedShipment> = plan_shipments(&body.order)
        .into_iter()
        .map(|request| dto::PlannedShipment {
            submittable: request.is_submittable(),
            request,
        })
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({ "shipments": planned })),
    )
        .into_response()
}
