use axum::Router;

use crate::db::Store;

pub mod cart;
pub mod doc;
pub mod invoices;
pub mod orders;
pub mod params;
pub mod products;
pub mod reviews;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<Store> {
    Router::new()
        .nest("/users", users::router())
        .nest("/products", products::router())
        .nest("/reviews", reviews::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/invoices", invoices::router())
}
