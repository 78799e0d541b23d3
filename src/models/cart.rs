//! Cart data model
//!
//! A line item is a denormalized snapshot of the plant at add time plus the
//! selected pot size and a quantity. Line identity is (plant id, size).

use serde::{Deserialize, Serialize};

use super::plant::Plant;

/// Pot size selected when adding a plant to the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlantSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl PlantSize {
    /// Short label used by the size picker
    pub fn label(&self) -> &'static str {
        match self {
            PlantSize::Small => "S",
            PlantSize::Medium => "M",
            PlantSize::Large => "L",
        }
    }
}

/// One (plant, size) cart entry
///
/// Invariant: `quantity >= 1`. The cart store removes the line instead of
/// letting an update drive quantity to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CartItem {
    /// Plant id at add time
    pub plant_id: u64,
    /// Display name snapshot
    pub name: String,
    /// Unit price snapshot, base currency
    pub price: u32,
    /// Image reference snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Selected size
    pub size: PlantSize,
    /// Positive quantity
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot a plant into a new line item
    pub fn from_plant(plant: &Plant, size: PlantSize, quantity: u32) -> Self {
        Self {
            plant_id: plant.id,
            name: plant.display_name().to_string(),
            price: plant.effective_price(),
            image_url: plant.image_url.clone(),
            size,
            quantity,
        }
    }

    /// Line identity check
    pub fn matches(&self, plant_id: u64, size: PlantSize) -> bool {
        self.plant_id == plant_id && self.size == size
    }

    /// Line subtotal in base currency
    pub fn subtotal(&self) -> u64 {
        u64::from(self.price) * u64::from(self.quantity)
    }
}
