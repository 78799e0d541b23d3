//! Catalog view state machine
//!
//! Combines the fetched base list, active search results, filters, sort
//! order, and pagination into the one list the catalog page renders.
//! Browsing and Searching are explicit states; filter changes only apply
//! while browsing, sort applies to whichever list is active, and every
//! filter or search transition resets to page 1.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::filters::{CategoryFilter, FilterState, PriceRange, SunlightFilter};
use crate::catalog::pagination::{self, page_window};
use crate::catalog::sort::{sorted_by, SortKey};
use crate::models::plant::Plant;
use crate::services::CatalogSource;

/// Which list the catalog page is showing
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMode {
    /// Base catalog, server-paginated, with local filters
    Browsing,
    /// Active search with its own result list
    Searching { query: String, results: Vec<Plant> },
}

impl ViewMode {
    pub fn is_searching(&self) -> bool {
        matches!(self, ViewMode::Searching { .. })
    }
}

/// The catalog page's state
pub struct CatalogView {
    source: Arc<dyn CatalogSource>,
    /// Plants loaded for the current server page
    base: Vec<Plant>,
    /// Server-reported catalog size, authoritative while unfiltered
    server_total: u64,
    filters: FilterState,
    sort: SortKey,
    page: u32,
    mode: ViewMode,
}

impl CatalogView {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            base: Vec::new(),
            server_total: 0,
            filters: FilterState::default(),
            sort: SortKey::default(),
            page: 1,
            mode: ViewMode::Browsing,
        }
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    fn is_filtered(&self) -> bool {
        self.filters != FilterState::default()
    }

    /// Fetch and install a server page of the base catalog
    pub async fn load_page(&mut self, page: u32) -> Result<(), crate::error::AppError> {
        let page = page.max(1);
        let fetched = self.source.list(page).await?;
        self.base = fetched.plants;
        self.server_total = fetched.total_count;
        self.page = page;
        Ok(())
    }

    /// Submit a search query
    ///
    /// A blank query clears search instead. A fetch failure still enters
    /// `Searching`, with an empty result list, so the page shows "no plants
    /// found" rather than silently falling back to browsing.
    pub async fn submit_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.clear_search();
            return;
        }
        let results = match self.source.search(query).await {
            Ok(found) => found.plants,
            Err(e) => {
                debug!(query, error = %e, "search failed, showing empty results");
                Vec::new()
            }
        };
        self.mode = ViewMode::Searching {
            query: query.to_string(),
            results,
        };
        self.page = 1;
    }

    /// Leave search mode and restore the base list at page 1
    pub fn clear_search(&mut self) {
        self.mode = ViewMode::Browsing;
        self.page = 1;
    }

    /// Apply an incoming `q` query parameter; empty or absent is a no-op
    pub async fn apply_query_param(&mut self, q: Option<&str>) {
        if let Some(q) = q {
            if !q.trim().is_empty() {
                self.submit_search(q).await;
            }
        }
    }

    /// Change the sort order; applies to whichever list is active
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Category filter changes only apply while browsing
    pub fn set_category(&mut self, category: CategoryFilter) {
        if self.mode.is_searching() {
            return;
        }
        self.filters.category = category;
        self.page = 1;
    }

    pub fn set_price_range(&mut self, price: PriceRange) {
        if self.mode.is_searching() {
            return;
        }
        self.filters.price = price;
        self.page = 1;
    }

    pub fn set_sunlight(&mut self, sunlight: SunlightFilter) {
        if self.mode.is_searching() {
            return;
        }
        self.filters.sunlight = sunlight;
        self.page = 1;
    }

    /// Jump to a page, clamped to the valid range
    ///
    /// While browsing unfiltered this fetches the requested server page;
    /// filtered and search lists paginate locally.
    pub async fn set_page(&mut self, page: u32) -> Result<(), crate::error::AppError> {
        let page = page.clamp(1, self.total_pages());
        if !self.mode.is_searching() && !self.is_filtered() {
            return self.load_page(page).await;
        }
        self.page = page;
        Ok(())
    }

    /// The list whose length drives local pagination
    fn active_list(&self) -> Vec<Plant> {
        match &self.mode {
            ViewMode::Searching { results, .. } => results.clone(),
            ViewMode::Browsing => self
                .filters
                .apply(&self.base)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// The filtered, sorted, paginated list the page renders
    pub fn visible_plants(&self) -> Vec<Plant> {
        let sorted = sorted_by(&self.active_list(), self.sort);
        if !self.mode.is_searching() && !self.is_filtered() {
            // Already one server page worth
            return sorted;
        }
        pagination::page_slice(&sorted, self.page).to_vec()
    }

    /// Total page count under the current mode and filters
    pub fn total_pages(&self) -> u32 {
        if !self.mode.is_searching() && !self.is_filtered() {
            return pagination::total_pages(self.server_total as usize);
        }
        pagination::total_pages(self.active_list().len())
    }

    /// Page-number buttons for the current position
    pub fn page_numbers(&self) -> Vec<u32> {
        page_window(self.page, self.total_pages())
    }
}
