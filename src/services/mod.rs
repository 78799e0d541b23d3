//! External collaborators: the catalog API client and its fallback data

pub mod catalog;
pub mod mock_catalog;

pub use catalog::{CatalogService, CatalogSource, PerenualClient, PlantPage, SearchResults};
