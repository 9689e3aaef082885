use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use dzcart_cart::{merge_items, Cart, CartItem};
use dzcart_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:user", get(get_cart).put(put_cart))
        .route("/:user/merge", post(merge_cart))
}

pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user): Path<String>,
) -> axum::response::Response {
    let user: UserId = match user.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    match services.account.fetch_cart(user).await {
        Ok(Some(cart)) => (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "no cart for user"),
        Err(e) => errors::account_error_to_response(e),
    }
}

pub async fn put_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user): Path<String>,
    Json(items): Json<Vec<CartItem>>,
) -> axum::response::Response {
    let user: UserId = match user.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    match services.account.save_cart(user, items).await {
        Ok(cart) => (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response(),
        Err(e) => errors::account_error_to_response(e),
    }
}

/// Fold guest lines into the user's persisted cart.
///
/// Matching products accumulate quantity; newcomers are appended verbatim.
pub async fn merge_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user): Path<String>,
    Json(body): Json<dto::MergeCartRequest>,
) -> axum::response::Response {
    let user: UserId = match user.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    let persisted = match services.account.fetch_cart(user).await {
        Ok(cart) => cart.map(Cart::into_items).unwrap_or_default(),
        Err(e) => return errors::account_error_to_response(e),
    };

    let merged = merge_items(persisted, body.items);

    match services.account.save_cart(user, merged).await {
        Ok(cart) => (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response(),
        Err(e) => errors::account_error_to_response(e),
    }
}
