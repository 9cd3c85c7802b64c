//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Landing page
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (database)
//!
//! # Auth
//! GET  /register         - Registration form
//! POST /register         - Create account
//! GET  /login            - Login form
//! POST /login            - Start session
//! GET  /logout           - End session
//!
//! # Products (requires auth)
//! GET  /products         - Product listing
//! GET  /add_product      - Add product form
//! POST /add_product      - Create product
//! ```

pub mod auth;
pub mod health;
pub mod home;
pub mod products;

use axum::{Router, http::Uri, routing::get};

use crate::error::AppError;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/add_product", get(products::add_page).post(products::add))
}

/// Create the health check router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Build every application route (without middleware or static files).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .merge(product_routes())
        .merge(health_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
