//! Catalog records as served by the mock store API.
//!
//! Field names on the wire are the API's Portuguese names (`nomeProduto`,
//! `preco`, ...). Every display field is optional: records occasionally come
//! back with holes, and the storefront substitutes a fallback instead of
//! failing (missing price counts as zero).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ProductId};

/// Placeholder image used when a record has no photo URL.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400";

/// Fallback display name for products missing one.
pub const FALLBACK_PRODUCT_NAME: &str = "Produto";

/// Fallback description for products missing one.
pub const FALLBACK_DESCRIPTION: &str = "Descrição não disponível.";

/// A product record from the catalog.
///
/// Immutable from the storefront's perspective. Unknown fields are preserved
/// in `extra` so a persisted copy round-trips whatever the API sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nomeProduto", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "preco",
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(rename = "fotoProduto", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Unit price, with a missing price counting as zero.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.price.unwrap_or_default()
    }

    /// Display name, falling back to [`FALLBACK_PRODUCT_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(FALLBACK_PRODUCT_NAME)
    }

    /// Photo URL, falling back to [`PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn photo_url(&self) -> &str {
        self.photo.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Description, falling back to [`FALLBACK_DESCRIPTION`].
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(FALLBACK_DESCRIPTION)
    }
}

/// A category record from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "nomeCategoria", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "fotoCategoria", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}
