//! Data models for the storefront engine

pub mod cart;
pub mod plant;

pub use cart::{CartItem, PlantSize};
pub use plant::{
    classify_placement, deterministic_price, infer_sunlight, CareLevel, Placement, Plant, Sunlight,
};
