//! Shopping cart store
//!
//! Holds the line-item list and the cart-panel visibility flag. Every
//! mutation of the line items re-serializes the whole cart to the key-value
//! store; a failed read restores an empty cart and a failed write degrades
//! to an in-memory session. Cart mutations are synchronous and atomic from
//! the caller's perspective.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::cart::{CartItem, PlantSize};
use crate::models::plant::Plant;
use crate::storage::{keys, KvStore};

/// Persisted cart blob
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCart {
    items: Vec<CartItem>,
    last_updated: DateTime<Utc>,
}

/// The cart store
///
/// Owned by the application root; price displays read it, "add to cart"
/// actions anywhere in the UI mutate it.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    is_open: bool,
    store: KvStore,
}

impl CartStore {
    /// Restore the cart from the store
    ///
    /// A missing or corrupt blob reads as an empty cart; the panel always
    /// starts closed.
    pub fn load(store: KvStore) -> Self {
        let items = store
            .load::<PersistedCart>(keys::CART)
            .map(|cart| cart.items)
            .unwrap_or_default();
        Self {
            items,
            is_open: false,
            store,
        }
    }

    /// Current line items
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart panel is shown
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Add `quantity` of a plant in the given size
    ///
    /// An existing (plant id, size) line gets its quantity incremented; a
    /// different size of the same plant is a distinct line. Opens the cart
    /// panel.
    pub fn add_to_cart(&mut self, plant: &Plant, size: PlantSize, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.matches(plant.id, size)) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem::from_plant(plant, size, quantity)),
        }
        self.is_open = true;
        self.persist();
    }

    /// Remove a line entirely; absent lines are a no-op
    pub fn remove_from_cart(&mut self, plant_id: u64, size: PlantSize) {
        let before = self.items.len();
        self.items.retain(|i| !i.matches(plant_id, size));
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Set a line's quantity; zero or below removes the line
    pub fn update_quantity(&mut self, plant_id: u64, size: PlantSize, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(plant_id, size);
            return;
        }
        // Saturate rather than wrap so an oversized update can never land a
        // line back on zero
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| i.matches(plant_id, size)) {
            item.quantity = quantity;
            self.persist();
        }
    }

    /// Empty all lines
    pub fn clear_cart(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.persist();
    }

    /// Sum of quantities across all lines
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of (price x quantity) across all lines, base currency
    pub fn total_price(&self) -> u64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Flip the cart panel visibility
    pub fn toggle_cart(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Show the cart panel
    pub fn open_cart(&mut self) {
        self.is_open = true;
    }

    /// Hide the cart panel
    pub fn close_cart(&mut self) {
        self.is_open = false;
    }

    /// Re-serialize the full cart; failures degrade to in-memory state
    fn persist(&self) {
        let blob = PersistedCart {
            items: self.items.clone(),
            last_updated: Utc::now(),
        };
        if let Err(e) = self.store.save(keys::CART, &blob) {
            warn!(error = %e, "failed to persist cart, keeping in-memory state");
        }
    }
}
