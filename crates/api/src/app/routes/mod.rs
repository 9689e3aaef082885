use axum::Router;

pub mod addresses;
pub mod carts;
pub mod orders;
pub mod system;

/// Router for all storefront endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/carts", carts::router())
        .nest("/addresses", addresses::router())
        .nest("/orders", orders::router())
}
