//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::cart::{CartError, CartStore, FileStore};
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::AppError;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The cart store sits behind a mutex: its
/// operations are short synchronous read-modify-write cycles, and the lock
/// serializes them the way single-threaded event dispatch serialized the
/// original client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: Mutex<CartStore<FileStore>>,
}

impl AppState {
    /// Create a new application state, hydrating the cart from the
    /// configured store path.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted store cannot be opened or read.
    pub fn new(config: StorefrontConfig) -> Result<Self, CartError> {
        let catalog = CatalogClient::new(&config.catalog_base_url);
        let store = FileStore::open(config.cart_store_path.clone())?;
        let cart = Mutex::new(CartStore::new(store)?);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Lock the cart store for a read-modify-write cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn cart(&self) -> Result<MutexGuard<'_, CartStore<FileStore>>, AppError> {
        self.inner
            .cart
            .lock()
            .map_err(|_| AppError::Internal("cart lock poisoned".to_string()))
    }
}
