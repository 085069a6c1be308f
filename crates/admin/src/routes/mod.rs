//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (registered in main)
//!
//! # Products
//! GET  /                       - Redirect to /products
//! GET  /products               - Product listing, selection and modals
//! POST /products               - Create, update or delete a product
//!
//! # JSON API
//! GET  /api/products/by-tags   - Products carrying any of the given tags
//! ```

pub mod api;
pub mod products;

use axum::{Router, response::Redirect, routing::get};

use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/products", get(products::index).post(products::submit))
        .merge(api::router())
}
