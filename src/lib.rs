//! Green Thumb storefront core
//!
//! The non-rendering half of a plant storefront: the catalog view state
//! machine (search, filters, sort, pagination), the shopping cart store,
//! the currency formatter, and the debounced search-suggestion helper,
//! backed by a plant API client with deterministic mock fallbacks and a
//! file-based key-value store for session state.
//!
//! Every failure mode degrades: a dead or rate-limited API substitutes
//! mock data, corrupt storage reads as empty, and a failed persistence
//! write leaves the session in-memory only. Nothing in this crate crashes
//! the caller.

pub mod cart;
pub mod catalog;
pub mod currency;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod storage;

pub use cart::CartStore;
pub use catalog::{CatalogView, CategoryFilter, PriceRange, SortKey, SunlightFilter, ViewMode};
pub use currency::CurrencyStore;
pub use error::AppError;
pub use models::{CartItem, Plant, PlantSize};
pub use search::SearchBox;
pub use services::{CatalogService, CatalogSource, PerenualClient};
pub use storage::KvStore;
