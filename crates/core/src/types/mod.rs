//! Shared type definitions.

pub mod catalog;
pub mod id;
pub mod price;

pub use catalog::{Category, Product, FALLBACK_DESCRIPTION, FALLBACK_PRODUCT_NAME, PLACEHOLDER_IMAGE};
pub use id::{CategoryId, ProductId};
pub use price::display_brl;
