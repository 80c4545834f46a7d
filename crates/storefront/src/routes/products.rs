//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stech_core::{display_brl, Product, ProductId};

use crate::error::Result;
use crate::state::AppState;

/// Pix payment discount multiplier (5% off).
const PIX_MULTIPLIER: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

/// Product card display data for the listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub nome: String,
    pub preco: String,
    pub foto: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_str().to_owned(),
            nome: product.display_name().to_owned(),
            preco: display_brl(product.unit_price()),
            foto: product.photo_url().to_owned(),
        }
    }
}

/// Product detail display data.
///
/// Carries both prices: the full price and the Pix price (5% discount). The
/// discount applies on this page only; cart totals stay full-price.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetailView {
    pub id: String,
    pub nome: String,
    pub descricao: String,
    pub foto: String,
    pub preco: String,
    pub preco_pix: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let price = product.unit_price();
        Self {
            id: product.id.as_str().to_owned(),
            nome: product.display_name().to_owned(),
            descricao: product.display_description().to_owned(),
            foto: product.photo_url().to_owned(),
            preco: display_brl(price),
            preco_pix: display_brl(price * PIX_MULTIPLIER),
        }
    }
}

/// Product listing filters.
#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    /// Keep products priced at or below this value.
    pub preco_max: Option<Decimal>,
    /// Keep products whose name contains this text (case-insensitive).
    pub nome: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(max) = self.preco_max
            && product.unit_price() > max
        {
            return false;
        }
        if let Some(needle) = &self.nome {
            let name = product.display_name().to_lowercase();
            if !name.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// List products, optionally filtered by max price and name.
///
/// A catalog failure is logged and surfaced as an empty list; it is not
/// retried.
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Json<Vec<ProductView>> {
    let products = match state.catalog().get_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("Failed to fetch products: {e}");
            Vec::new()
        }
    };

    Json(
        products
            .iter()
            .filter(|product| filter.matches(product))
            .map(ProductView::from)
            .collect(),
    )
}

/// Display a single product with full and Pix pricing.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailView>> {
    let product = state.catalog().get_product(&ProductId::new(id)).await?;
    Ok(Json(ProductDetailView::from(&product)))
}
