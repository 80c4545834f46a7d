//! Cache types for catalog API responses.

use stech_core::{Category, Product};

/// Cache key for catalog lists.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Products,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Products(Vec<Product>),
}
