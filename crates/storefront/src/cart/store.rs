//! Cart reconciliation over the flat persisted representation.
//!
//! The persisted `"cart"` key holds a JSON array of product records, one
//! element per purchased unit (a quantity-3 line is three duplicate entries).
//! That flat array is the source of truth shared by every surface: the badge
//! counter reads its raw length, the detail page appends raw copies, and the
//! cart view groups it into quantity lines. [`CartStore`] never trusts its
//! in-memory view across surface transitions; it re-derives from the store
//! on every load.

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

use stech_core::{Product, ProductId};

use crate::cart::storage::KeyValueStore;
use crate::cart::CartError;

/// Store key of the flat persisted cart.
pub const CART_KEY: &str = "cart";

/// A grouped cart line: one product at a quantity of at least 1.
///
/// Quantity 0 is never represented; a line reaching zero is dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// `unit price × quantity`, at full precision. Missing price counts as 0.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.unit_price() * Decimal::from(self.quantity)
    }
}

/// Group flat units into quantity lines, preserving first-seen order of
/// distinct products.
///
/// Pure derivation: no storage access, independently testable.
#[must_use]
pub fn group_units(units: &[Product]) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::new();
    for unit in units {
        if let Some(line) = lines.iter_mut().find(|l| l.product.id == unit.id) {
            line.quantity += 1;
        } else {
            lines.push(CartLine {
                product: unit.clone(),
                quantity: 1,
            });
        }
    }
    lines
}

/// Expand grouped lines back into the flat representation: a quantity-N line
/// becomes N duplicate copies of the product's current cached record.
#[must_use]
pub fn flatten_lines(lines: &[CartLine]) -> Vec<Product> {
    lines
        .iter()
        .flat_map(|line| std::iter::repeat_n(line.product.clone(), line.quantity as usize))
        .collect()
}

/// The cart: a grouped quantity view reconciled with the flat persisted store.
///
/// Owns an injected [`KeyValueStore`] (the `localStorage` analog); there is
/// no ambient global store. Every mutation re-flattens the grouped view,
/// overwrites the persisted key, and publishes the new unit count on a watch
/// channel that badge displays may subscribe to. Same-surface writers should
/// still re-read [`CartStore::unit_count`] after mutating rather than rely
/// on the notification alone.
pub struct CartStore<S> {
    store: S,
    lines: Vec<CartLine>,
    changes: watch::Sender<usize>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Hydrate a cart from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read. A malformed cart
    /// *value* is not an error; it degrades to an empty cart.
    pub fn new(store: S) -> Result<Self, CartError> {
        let (changes, _) = watch::channel(0);
        let mut cart = Self {
            store,
            lines: Vec::new(),
            changes,
        };
        cart.load()?;
        Ok(cart)
    }

    /// Rebuild the grouped view from the flat persisted representation.
    ///
    /// Call on every surface transition: other surfaces may have appended
    /// raw units since this view was last derived.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(&mut self) -> Result<&[CartLine], CartError> {
        let units = self.read_units()?;
        self.lines = group_units(&units);
        Ok(&self.lines)
    }

    /// The current grouped view.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Append `count` raw units of `product` to the persisted representation.
    ///
    /// Reads the flat store first rather than flattening the in-memory view,
    /// so it composes with whatever another surface already wrote (grouped
    /// or not). `count == 0` is a no-op; callers clamp to at least 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn add_units(&mut self, product: &Product, count: u32) -> Result<&[CartLine], CartError> {
        if count == 0 {
            return Ok(&self.lines);
        }
        let mut units = self.read_units()?;
        units.extend(std::iter::repeat_n(product.clone(), count as usize));
        self.write_units(&units)?;
        self.lines = group_units(&units);
        self.notify();
        Ok(&self.lines)
    }

    /// Set a line's quantity. `quantity <= 0` drops the line entirely.
    ///
    /// Lines for unknown products are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<&[CartLine], CartError> {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == *product_id)
        {
            line.quantity = quantity;
            self.persist()?;
            self.notify();
        }
        Ok(&self.lines)
    }

    /// Drop a line unconditionally. Removing an absent product changes
    /// nothing, in memory or on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<&[CartLine], CartError> {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != *product_id);
        if self.lines.len() != before {
            self.persist()?;
            self.notify();
        }
        Ok(&self.lines)
    }

    /// Cart total at full precision; rounding is a display concern.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Badge count: total persisted units (sum of quantities), not the
    /// number of distinct lines.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.lines.iter().map(|line| line.quantity as usize).sum()
    }

    /// Empty the cart and delete the persisted key entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.store.remove(CART_KEY)?;
        self.lines.clear();
        self.notify();
        Ok(())
    }

    /// Subscribe to unit-count change notifications.
    ///
    /// Best-effort, storage-event style: every mutation publishes the new
    /// unit count.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.changes.subscribe()
    }

    /// Access the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_units(&self) -> Result<Vec<Product>, CartError> {
        let Some(raw) = self.store.get(CART_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(units) => Ok(units),
            Err(error) => {
                warn!(%error, "persisted cart is malformed, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write_units(&self, units: &[Product]) -> Result<(), CartError> {
        let raw = serde_json::to_string(units)?;
        self.store.set(CART_KEY, &raw)?;
        Ok(())
    }

    fn persist(&self) -> Result<(), CartError> {
        self.write_units(&flatten_lines(&self.lines))
    }

    fn notify(&self) {
        self.changes.send_replace(self.unit_count());
    }
}
