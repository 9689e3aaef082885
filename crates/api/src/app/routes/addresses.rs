use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};

use dzcart_core::{DomainError, UserId};
use dzcart_delivery::Address;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/:user", get(list_addresses).post(create_address))
        .route("/:user/:index", delete(delete_address))
}

pub async fn list_addresses(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user): Path<String>,
) -> axum::response::Response {
    let user: UserId = match user.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    match services.account.fetch_addresses(user).await {
        Ok(addresses) => (StatusCode::OK, Json(addresses)).into_response(),
        Err(e) => errors::account_error_to_response(e),
    }
}

pub async fn create_address(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user): Path<String>,
    Json(address): Json<Address>,
) -> axum::response::Response {
    let user: UserId = match user.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    // The account keeps complete addresses only; incomplete drafts stay on
    // the device.
    if !address.is_complete() {
        return errors::domain_error_to_response(DomainError::validation(
            "address requires wilaya, commune and an address line",
        ));
    }

    match services.account.save_address(user, address).await {
        Ok(address) => (StatusCode::CREATED, Json(address)).into_response(),
        Err(e) => errors::account_error_to_response(e),
    }
}

pub async fn delete_address(
    Extension(services): Extension<Arc<AppServices>>,
    Path((user, index)): Path<(String, usize)>,
) -> axum::response::Response {
    let user: UserId = match user.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    match services.account.delete_address(user, index).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::account_error_to_response(e),
    }
}
