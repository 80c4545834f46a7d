//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page data (category list)
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /categorias              - Category list
//! GET  /produtos                - Product list (?preco_max=, ?nome=)
//! GET  /produtos/{id}           - Product detail (with Pix price)
//!
//! # Cart
//! GET    /carrinho              - Grouped cart view + total
//! POST   /carrinho/itens        - Add units of a product
//! PUT    /carrinho/itens/{id}   - Set line quantity (<= 0 removes)
//! DELETE /carrinho/itens/{id}   - Remove line
//! GET    /carrinho/contagem     - Badge count (raw persisted units)
//! POST   /carrinho/finalizar    - Checkout: clears the cart
//!
//! # Theme
//! GET  /tema                    - Current light/dark flag
//! POST /tema/alternar           - Toggle the flag
//! ```

pub mod cart;
pub mod categories;
pub mod products;
pub mod theme;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_sessions::{MemoryStore as SessionMemoryStore, SessionManagerLayer};

use crate::state::AppState;

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new().route("/", get(categories::index))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/itens", post(cart::add))
        .route("/itens/{id}", put(cart::update).delete(cart::remove))
        .route("/contagem", get(cart::count))
        .route("/finalizar", post(cart::checkout))
}

/// Create the theme routes router.
pub fn theme_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(theme::show))
        .route("/alternar", post(theme::toggle))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page data
        .route("/", get(categories::index))
        // Catalog routes
        .nest("/categorias", category_routes())
        .nest("/produtos", product_routes())
        // Cart routes
        .nest("/carrinho", cart_routes())
        // Theme routes
        .nest("/tema", theme_routes())
}

/// Assemble the full application: routes, session layer, and state.
///
/// Sessions only carry the theme flag, so the in-memory session store is
/// enough.
pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(SessionMemoryStore::default()).with_secure(false);

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
