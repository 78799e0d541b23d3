//! Catalog page state: filters, sort, pagination, and the view machine

pub mod filters;
pub mod pagination;
pub mod sort;
pub mod view;

pub use filters::{CategoryFilter, FilterState, PriceRange, SunlightFilter};
pub use pagination::{page_window, total_pages, PAGE_SIZE};
pub use sort::{sorted_by, SortKey};
pub use view::{CatalogView, ViewMode};
