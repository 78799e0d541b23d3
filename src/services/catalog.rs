//! Catalog data source
//!
//! `PerenualClient` speaks the third-party plant API; `CatalogService` wraps
//! it with the soft-fallback policy: any transport or rate-limit failure is
//! recovered locally from the fixed mock catalog and logged at warn level.
//! Callers never see a hard fetch error from the service.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;
use crate::models::plant::{CareLevel, Placement, Plant, Sunlight};

use super::mock_catalog;

/// One page of catalog listings
#[derive(Debug, Clone, PartialEq)]
pub struct PlantPage {
    pub plants: Vec<Plant>,
    /// Server-reported total item count across all pages
    pub total_count: u64,
}

/// Search results with autocomplete suggestions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    pub plants: Vec<Plant>,
    pub suggestions: Vec<String>,
}

/// Source of catalog data
///
/// The view state machine and search helper depend on this seam, not on the
/// concrete client, so tests can drive them from fixtures.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of the listing
    async fn list(&self, page: u32) -> Result<PlantPage, AppError>;

    /// Fetch a single plant by id
    async fn detail(&self, id: u64) -> Result<Plant, AppError>;

    /// Free-text search with suggestions
    async fn search(&self, query: &str) -> Result<SearchResults, AppError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// In-body marker some rate-limited responses carry instead of HTTP 429
const RATE_LIMIT_FIELD: &str = "X-RateLimit-Exceeded";

#[derive(Debug, Deserialize)]
struct ApiListResponse {
    #[serde(default)]
    data: Vec<ApiPlant>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default, rename = "X-RateLimit-Exceeded")]
    rate_limit_exceeded: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    #[serde(default)]
    medium_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPlant {
    id: u64,
    #[serde(default)]
    common_name: Option<String>,
    /// The API reports this either as a string or as a list of synonyms
    #[serde(default)]
    scientific_name: Option<serde_json::Value>,
    #[serde(default)]
    family: Option<String>,
    #[serde(default)]
    genus: Option<String>,
    #[serde(default)]
    care_level: Option<String>,
    #[serde(default)]
    sunlight: Vec<String>,
    #[serde(default)]
    price: Option<u32>,
    #[serde(default)]
    default_image: Option<ApiImage>,
    #[serde(default)]
    indoor: Option<bool>,
}

impl ApiPlant {
    fn into_plant(self) -> Plant {
        let scientific_name = self.scientific_name.and_then(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Array(items) => items
                .into_iter()
                .find_map(|item| item.as_str().map(str::to_string)),
            _ => None,
        });
        Plant {
            id: self.id,
            common_name: self.common_name,
            scientific_name,
            family: self.family,
            genus: self.genus,
            care_level: self.care_level.as_deref().map(CareLevel::parse),
            sunlight: self
                .sunlight
                .iter()
                .filter_map(|s| Sunlight::parse(s))
                .collect(),
            price: self.price,
            image_url: self.default_image.and_then(|i| i.medium_url),
            placement: self.indoor.map(|indoor| {
                if indoor {
                    Placement::Indoor
                } else {
                    Placement::Outdoor
                }
            }),
        }
        .into_enriched()
    }
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

const DEFAULT_BASE_URL: &str = "https://perenual.com/api";

/// Raw client for the third-party plant API
///
/// Returns hard errors; the fallback policy lives in [`CatalogService`].
pub struct PerenualClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PerenualClient {
    /// Create a client against the production API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn get_list(&self, url: String) -> Result<ApiListResponse, AppError> {
        let response = self.http_client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimited);
        }
        let body: ApiListResponse = response.error_for_status()?.json().await?;
        if body.rate_limit_exceeded.is_some() {
            return Err(AppError::RateLimited);
        }
        Ok(body)
    }

    /// Fetch one listing page
    pub async fn list(&self, page: u32) -> Result<PlantPage, AppError> {
        let url = format!(
            "{}/species-list?key={}&page={}",
            self.base_url, self.api_key, page
        );
        let body = self.get_list(url).await?;
        let plants: Vec<Plant> = body.data.into_iter().map(ApiPlant::into_plant).collect();
        let total_count = body.total.unwrap_or(plants.len() as u64);
        Ok(PlantPage {
            plants,
            total_count,
        })
    }

    /// Fetch a single plant's detail record
    pub async fn detail(&self, id: u64) -> Result<Plant, AppError> {
        let url = format!(
            "{}/v2/species/details/{}?key={}",
            self.base_url, id, self.api_key
        );
        let response = self.http_client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimited);
        }
        let body: serde_json::Value = response.error_for_status()?.json().await?;
        if body.get(RATE_LIMIT_FIELD).is_some() {
            return Err(AppError::RateLimited);
        }
        let api_plant: ApiPlant = serde_json::from_value(body)
            .map_err(|e| AppError::internal(format!("unexpected detail payload: {e}")))?;
        Ok(api_plant.into_plant())
    }

    /// Free-text search; the API reuses the listing shape
    pub async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
        let url = format!(
            "{}/species-list?key={}&page=1&q={}",
            self.base_url,
            self.api_key,
            urlencode(query)
        );
        let body = self.get_list(url).await?;
        let plants: Vec<Plant> = body.data.into_iter().map(ApiPlant::into_plant).collect();
        let suggestions = plants
            .iter()
            .filter_map(|p| p.common_name.clone())
            .take(mock_catalog::SUGGESTION_CAP)
            .collect();
        Ok(SearchResults {
            plants,
            suggestions,
        })
    }
}

/// Minimal percent-encoding for the query parameter
fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Soft-fallback service
// ---------------------------------------------------------------------------

/// Catalog source with the never-fail fallback policy
pub struct CatalogService {
    client: PerenualClient,
}

impl CatalogService {
    pub fn new(client: PerenualClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for CatalogService {
    async fn list(&self, page: u32) -> Result<PlantPage, AppError> {
        match self.client.list(page).await {
            Ok(page) => Ok(page),
            Err(e) => {
                warn!(page, error = %e, "listing fetch failed, using fallback catalog");
                if page <= 1 {
                    let plants = mock_catalog::BROWSE_CATALOG.clone();
                    let total_count = plants.len() as u64;
                    Ok(PlantPage {
                        plants,
                        total_count,
                    })
                } else {
                    // Never fabricate entries past the first page
                    Ok(PlantPage {
                        plants: Vec::new(),
                        total_count: mock_catalog::BROWSE_CATALOG.len() as u64,
                    })
                }
            }
        }
    }

    async fn detail(&self, id: u64) -> Result<Plant, AppError> {
        match self.client.detail(id).await {
            Ok(plant) => Ok(plant),
            Err(e) => {
                warn!(id, error = %e, "detail fetch failed, synthesizing mock record");
                Ok(mock_catalog::mock_detail(id))
            }
        }
    }

    async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
        match self.client.search(query).await {
            Ok(results) => Ok(results),
            Err(e) => {
                warn!(query, error = %e, "search fetch failed, using fallback search");
                let (plants, suggestions) = mock_catalog::mock_search(query);
                Ok(SearchResults {
                    plants,
                    suggestions,
                })
            }
        }
    }
}
