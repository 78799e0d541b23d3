//! Catalog filter predicates
//!
//! Filters apply as a pipeline over the browse catalog: category, then
//! price range, then sunlight. Each stage is a pure predicate; the view
//! composes them and re-paginates the result.

use serde::{Deserialize, Serialize};

use crate::models::plant::{Placement, Plant, Sunlight};

/// Indoor/outdoor category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Indoor,
    Outdoor,
}

impl CategoryFilter {
    /// Parse a query-string value; unknown values read as `All`
    pub fn from_param(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "indoor" => Self::Indoor,
            "outdoor" => Self::Outdoor,
            _ => Self::All,
        }
    }

    fn matches(self, plant: &Plant) -> bool {
        match self {
            Self::All => true,
            Self::Indoor => plant.placement == Some(Placement::Indoor),
            Self::Outdoor => plant.placement == Some(Placement::Outdoor),
        }
    }
}

/// Inclusive price band, base currency
///
/// An unset bound is open: no minimum reads as zero, no maximum as
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl PriceRange {
    pub fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self { min, max }
    }

    fn matches(self, plant: &Plant) -> bool {
        let price = match plant.price {
            Some(p) => p,
            None => return false,
        };
        let min = self.min.unwrap_or(0);
        let max = self.max.unwrap_or(u32::MAX);
        price >= min && price <= max
    }
}

/// Sunlight preference filter
///
/// `Flexible` selects plants tolerating both full sun and part shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunlightFilter {
    #[default]
    All,
    FullSun,
    PartShade,
    Flexible,
}

impl SunlightFilter {
    fn matches(self, plant: &Plant) -> bool {
        match self {
            Self::All => true,
            Self::FullSun => plant.sunlight.contains(&Sunlight::FullSun),
            Self::PartShade => plant.sunlight.contains(&Sunlight::PartShade),
            Self::Flexible => plant.is_flexible_sunlight(),
        }
    }
}

/// Combined filter state held by the catalog view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub price: PriceRange,
    pub sunlight: SunlightFilter,
}

impl FilterState {
    /// Apply all stages, preserving input order
    pub fn apply<'a>(&self, plants: &'a [Plant]) -> Vec<&'a Plant> {
        plants
            .iter()
            .filter(|p| self.category.matches(p))
            .filter(|p| self.price.matches(p))
            .filter(|p| self.sunlight.matches(p))
            .collect()
    }
}
