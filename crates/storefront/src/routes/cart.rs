//! Cart route handlers.
//!
//! Every handler re-derives the grouped view from the persisted store before
//! operating: another surface (the product detail flow, a second instance)
//! may have written raw units since this one last looked.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use stech_core::{display_brl, Product, ProductId};

use crate::cart::{CartLine, CartStore, KeyValueStore};
use crate::error::Result;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub nome: String,
    pub foto: String,
    pub quantidade: u32,
    pub preco_unitario: String,
    pub subtotal: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id.as_str().to_owned(),
            nome: line.product.display_name().to_owned(),
            foto: line.product.photo_url().to_owned(),
            quantidade: line.quantity,
            preco_unitario: display_brl(line.product.unit_price()),
            subtotal: display_brl(line.line_total()),
        }
    }
}

/// Cart display data: grouped lines, 2-dp total, and badge count.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub itens: Vec<CartItemView>,
    pub total: String,
    pub contagem: usize,
}

/// Badge count display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartCountView {
    pub contagem: usize,
}

/// Checkout confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub mensagem: String,
}

/// Add-to-cart request: the navigation layer passes the product record it
/// already fetched, plus how many units to add.
#[derive(Debug, Deserialize)]
pub struct AddToCartBody {
    pub produto: Product,
    pub quantidade: Option<u32>,
}

/// Quantity update request.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityBody {
    pub quantidade: i64,
}

fn view_of<S: KeyValueStore>(cart: &CartStore<S>) -> CartView {
    CartView {
        itens: cart.lines().iter().map(CartItemView::from).collect(),
        total: display_brl(cart.total()),
        contagem: cart.unit_count(),
    }
}

/// Display the grouped cart.
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    let mut cart = state.cart()?;
    cart.load()?;
    Ok(Json(view_of(&cart)))
}

/// Add units of a product to the cart.
///
/// Quantity defaults to 1 and is clamped to at least 1 before it reaches
/// the store.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCartBody>,
) -> Result<(StatusCode, Json<CartCountView>)> {
    let quantity = body.quantidade.unwrap_or(1).max(1);

    let mut cart = state.cart()?;
    cart.add_units(&body.produto, quantity)?;

    Ok((
        StatusCode::CREATED,
        Json(CartCountView {
            contagem: cart.unit_count(),
        }),
    ))
}

/// Set a line's quantity. Zero or negative removes the line.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateQuantityBody>,
) -> Result<Json<CartView>> {
    let mut cart = state.cart()?;
    cart.load()?;
    cart.set_quantity(&ProductId::new(id), body.quantidade)?;
    Ok(Json(view_of(&cart)))
}

/// Remove a line unconditionally.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CartView>> {
    let mut cart = state.cart()?;
    cart.load()?;
    cart.remove(&ProductId::new(id))?;
    Ok(Json(view_of(&cart)))
}

/// Badge count: raw persisted units, re-read from the store.
pub async fn count(State(state): State<AppState>) -> Result<Json<CartCountView>> {
    let mut cart = state.cart()?;
    cart.load()?;
    Ok(Json(CartCountView {
        contagem: cart.unit_count(),
    }))
}

/// Finalize the purchase: empty the cart and delete the persisted key.
pub async fn checkout(State(state): State<AppState>) -> Result<Json<CheckoutView>> {
    let mut cart = state.cart()?;
    cart.clear()?;
    Ok(Json(CheckoutView {
        mensagem: "Compra Finalizada!".to_string(),
    }))
}
