//! Search box state: debounced suggestions and recent-search history
//!
//! Keystrokes issue monotonically increasing sequence tokens; a debounced
//! fetch checks its token against the latest both before and after the
//! request and discards itself if a newer keystroke has landed, so a slow
//! early response can never overwrite a faster later one. Blur uses the
//! same token trick with a short grace delay so a click on a suggestion
//! still registers before the dropdown hides.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::services::{CatalogSource, SearchResults};
use crate::storage::{keys, KvStore};

/// Quiet period after the last keystroke before a fetch fires
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Delay between blur and dropdown hide, long enough for a click to land
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

/// Most recent searches kept
pub const RECENT_LIMIT: usize = 5;

/// Queries must be longer than this to fetch or to be remembered
const MIN_QUERY_LEN: usize = 1;

/// What a keystroke did to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTransition {
    /// Query changed but stayed in (or entered) the non-empty regime
    Edited,
    /// Query went from non-empty to empty; fires once per such transition
    Cleared,
}

/// Outcome of a keystroke: the fetch token plus the transition kind
#[derive(Debug, Clone, Copy)]
pub struct InputOutcome {
    pub token: u64,
    pub transition: QueryTransition,
}

/// Search input state
pub struct SearchBox {
    source: Arc<dyn CatalogSource>,
    store: KvStore,
    query: String,
    suggestions: Vec<String>,
    recents: Vec<String>,
    show_suggestions: bool,
    show_recents: bool,
    /// Latest issued fetch token; older in-flight fetches are stale
    fetch_seq: u64,
    /// Latest blur token; bumping it cancels a pending hide
    blur_seq: u64,
}

impl SearchBox {
    /// Restore recent searches from the store
    pub fn load(source: Arc<dyn CatalogSource>, store: KvStore) -> Self {
        let recents = store
            .load::<Vec<String>>(keys::RECENT_SEARCHES)
            .unwrap_or_default();
        Self {
            source,
            store,
            query: String::new(),
            suggestions: Vec::new(),
            recents,
            show_suggestions: false,
            show_recents: false,
            fetch_seq: 0,
            blur_seq: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn recent_searches(&self) -> &[String] {
        &self.recents
    }

    pub fn suggestions_visible(&self) -> bool {
        self.show_suggestions
    }

    pub fn recents_visible(&self) -> bool {
        self.show_recents
    }

    /// Record a keystroke
    ///
    /// Returns the token to pass to [`debounced_search`](Self::debounced_search)
    /// and whether this keystroke emptied a previously non-empty query. The
    /// `Cleared` transition is derived from the previous value, so it fires
    /// exactly once however often an empty query is re-entered.
    pub fn on_input(&mut self, text: &str) -> InputOutcome {
        let was_empty = self.query.trim().is_empty();
        let now_empty = text.trim().is_empty();
        self.query = text.to_string();
        self.fetch_seq += 1;
        self.blur_seq += 1;

        if now_empty {
            self.show_suggestions = false;
            self.suggestions.clear();
            self.show_recents = !self.recents.is_empty();
        } else {
            // Typing replaces the recents dropdown with live suggestions
            self.show_recents = false;
            if text.trim().len() <= MIN_QUERY_LEN {
                self.show_suggestions = false;
                self.suggestions.clear();
            }
        }

        let transition = if !was_empty && now_empty {
            QueryTransition::Cleared
        } else {
            QueryTransition::Edited
        };
        InputOutcome {
            token: self.fetch_seq,
            transition,
        }
    }

    /// Wait out the debounce window for the keystroke that issued `token`
    ///
    /// Returns the query to fetch, or `None` when a newer keystroke has
    /// superseded this one or the query is too short to search.
    pub async fn debounce(&self, token: u64) -> Option<String> {
        sleep(DEBOUNCE).await;
        if token != self.fetch_seq {
            return None;
        }
        let query = self.query.trim();
        if query.len() <= MIN_QUERY_LEN {
            return None;
        }
        Some(query.to_string())
    }

    /// Install a fetched response unless `token` has gone stale in flight
    ///
    /// This is the second half of the staleness check: a slow response for
    /// an old keystroke arriving after a newer one is discarded here rather
    /// than overwriting the newer suggestions.
    pub fn accept_results(&mut self, token: u64, results: SearchResults) -> Option<SearchResults> {
        if token != self.fetch_seq {
            debug!("discarding stale search response");
            return None;
        }
        self.suggestions = results.suggestions.clone();
        self.show_suggestions = true;
        Some(results)
    }

    /// Debounce, fetch, and install in one call
    ///
    /// Returns `None` for stale tokens, sub-length queries, and fetch
    /// failures.
    pub async fn debounced_search(&mut self, token: u64) -> Option<SearchResults> {
        let query = self.debounce(token).await?;
        let results = match self.source.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                debug!(query = %query, error = %e, "suggestion fetch failed");
                return None;
            }
        };
        self.accept_results(token, results)
    }

    /// Record a submitted query in the recent-search history
    ///
    /// Trivial queries (length ≤ 1 after trimming) are not remembered.
    /// Resubmitting an existing entry moves it to the front; the list is
    /// capped at [`RECENT_LIMIT`]. Hides both dropdowns.
    pub fn submit(&mut self, query: &str) {
        self.hide_dropdowns();
        let query = query.trim();
        if query.len() <= MIN_QUERY_LEN {
            return;
        }
        self.recents.retain(|r| r != query);
        self.recents.insert(0, query.to_string());
        self.recents.truncate(RECENT_LIMIT);
        self.persist_recents();
    }

    /// Remove one entry from the recent-search history
    pub fn remove_recent(&mut self, entry: &str) {
        let before = self.recents.len();
        self.recents.retain(|r| r != entry);
        if self.recents.len() != before {
            self.persist_recents();
        }
        if self.recents.is_empty() {
            self.show_recents = false;
        }
    }

    /// Pick a recent search; returns the query to resubmit
    pub fn select_recent(&mut self, entry: &str) -> String {
        self.blur_seq += 1;
        self.query = entry.to_string();
        self.hide_dropdowns();
        entry.to_string()
    }

    /// Pick a live suggestion; returns the query to resubmit
    pub fn select_suggestion(&mut self, suggestion: &str) -> String {
        self.blur_seq += 1;
        self.query = suggestion.to_string();
        self.hide_dropdowns();
        suggestion.to_string()
    }

    /// Focusing an empty input reveals the recent-search dropdown
    pub fn on_focus(&mut self) {
        self.blur_seq += 1;
        if self.query.trim().is_empty() && !self.recents.is_empty() {
            self.show_recents = true;
        }
    }

    /// Start the blur grace period; pass the token to `finish_blur`
    pub fn on_blur(&mut self) -> u64 {
        self.blur_seq += 1;
        self.blur_seq
    }

    /// Hide the dropdowns after the grace delay, unless something (a click
    /// on a suggestion, a refocus, a keystroke) superseded this blur
    pub async fn finish_blur(&mut self, token: u64) {
        sleep(BLUR_GRACE).await;
        if token == self.blur_seq {
            self.hide_dropdowns();
        }
    }

    /// A click outside the input and its dropdown hides both immediately
    pub fn on_click_outside(&mut self) {
        self.blur_seq += 1;
        self.hide_dropdowns();
    }

    fn hide_dropdowns(&mut self) {
        self.show_suggestions = false;
        self.show_recents = false;
    }

    fn persist_recents(&self) {
        if let Err(e) = self.store.save(keys::RECENT_SEARCHES, &self.recents) {
            debug!(error = %e, "failed to persist recent searches");
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::error::AppError;
    use crate::models::plant::Plant;
    use crate::services::mock_catalog::mock_search;
    use crate::services::PlantPage;

    struct StubSource;

    #[async_trait]
    impl CatalogSource for StubSource {
        async fn list(&self, _page: u32) -> Result<PlantPage, AppError> {
            Ok(PlantPage {
                plants: Vec::new(),
                total_count: 0,
            })
        }

        async fn detail(&self, id: u64) -> Result<Plant, AppError> {
            Err(AppError::internal(format!("no detail for {id}")))
        }

        async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
            let (plants, suggestions) = mock_search(query);
            Ok(SearchResults {
                plants,
                suggestions,
            })
        }
    }

    fn open_box() -> (TempDir, SearchBox) {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        (dir, SearchBox::load(Arc::new(StubSource), kv))
    }

    #[test]
    fn test_recent_searches_bounded_most_recent_first() {
        let (_dir, mut sb) = open_box();
        for q in ["fern", "pothos", "aloe", "hosta", "maple", "orchid"] {
            sb.submit(q);
        }
        assert_eq!(
            sb.recent_searches(),
            &["orchid", "maple", "hosta", "aloe", "pothos"]
        );
    }

    #[test]
    fn test_resubmit_moves_entry_to_front_without_duplicate() {
        let (_dir, mut sb) = open_box();
        sb.submit("fern");
        sb.submit("pothos");
        sb.submit("fern");
        assert_eq!(sb.recent_searches(), &["fern", "pothos"]);
    }

    #[test]
    fn test_trivial_queries_not_remembered() {
        let (_dir, mut sb) = open_box();
        sb.submit("x");
        sb.submit("  a  ");
        sb.submit("");
        assert!(sb.recent_searches().is_empty());
    }

    #[test]
    fn test_recents_persist_across_loads() {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();

        let mut sb = SearchBox::load(Arc::new(StubSource), kv.clone());
        sb.submit("pothos");
        sb.submit("fern");

        let restored = SearchBox::load(Arc::new(StubSource), kv);
        assert_eq!(restored.recent_searches(), &["fern", "pothos"]);
    }

    #[test]
    fn test_remove_recent_entry() {
        let (_dir, mut sb) = open_box();
        sb.submit("fern");
        sb.submit("pothos");
        sb.remove_recent("fern");
        assert_eq!(sb.recent_searches(), &["pothos"]);
        // Removing a missing entry is a no-op
        sb.remove_recent("fern");
        assert_eq!(sb.recent_searches(), &["pothos"]);
    }

    #[test]
    fn test_cleared_transition_fires_exactly_once() {
        let (_dir, mut sb) = open_box();
        assert_eq!(sb.on_input("po").transition, QueryTransition::Edited);
        assert_eq!(sb.on_input("pot").transition, QueryTransition::Edited);
        assert_eq!(sb.on_input("").transition, QueryTransition::Cleared);
        // Still empty: no retrigger
        assert_eq!(sb.on_input("").transition, QueryTransition::Edited);
        assert_eq!(sb.on_input("  ").transition, QueryTransition::Edited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_search_fetches_after_quiet_period() {
        let (_dir, mut sb) = open_box();
        let outcome = sb.on_input("pothos");
        let results = sb.debounced_search(outcome.token).await;

        let results = results.unwrap();
        assert!(!results.plants.is_empty());
        assert!(sb.suggestions_visible());
        assert!(!sb.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_token_is_discarded() {
        let (_dir, mut sb) = open_box();
        let first = sb.on_input("po");
        let second = sb.on_input("pothos");

        assert!(sb.debounced_search(first.token).await.is_none());
        assert!(sb.debounced_search(second.token).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_response_for_old_keystroke_is_discarded() {
        let (_dir, mut sb) = open_box();
        let first = sb.on_input("fern");
        let query = sb.debounce(first.token).await.unwrap();
        let (plants, suggestions) = mock_search(&query);
        let late = SearchResults {
            plants,
            suggestions,
        };

        // A newer keystroke lands while the first response is in flight
        sb.on_input("pothos");

        assert!(sb.accept_results(first.token, late).is_none());
        assert!(!sb.suggestions_visible());
        assert!(sb.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_never_fetches() {
        let (_dir, mut sb) = open_box();
        let outcome = sb.on_input("p");
        assert!(sb.debounced_search(outcome.token).await.is_none());
        assert!(!sb.suggestions_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shortening_query_clears_suggestions() {
        let (_dir, mut sb) = open_box();
        let outcome = sb.on_input("pothos");
        sb.debounced_search(outcome.token).await;
        assert!(sb.suggestions_visible());

        sb.on_input("p");
        assert!(!sb.suggestions_visible());
        assert!(sb.suggestions().is_empty());
    }

    #[test]
    fn test_focus_reveals_recents_only_when_empty_with_history() {
        let (_dir, mut sb) = open_box();
        sb.on_focus();
        assert!(!sb.recents_visible());

        sb.submit("pothos");
        sb.on_focus();
        assert!(sb.recents_visible());

        sb.on_input("fe");
        assert!(!sb.recents_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blur_hides_after_grace_unless_superseded() {
        let (_dir, mut sb) = open_box();
        sb.submit("pothos");
        sb.on_focus();
        assert!(sb.recents_visible());

        let token = sb.on_blur();
        sb.finish_blur(token).await;
        assert!(!sb.recents_visible());

        // A click during the grace period keeps its effect: selecting a
        // recent supersedes the pending hide and sets the query
        sb.on_focus();
        let token = sb.on_blur();
        let picked = sb.select_recent("pothos");
        sb.finish_blur(token).await;
        assert_eq!(picked, "pothos");
        assert_eq!(sb.query(), "pothos");
    }

    #[test]
    fn test_click_outside_hides_immediately() {
        let (_dir, mut sb) = open_box();
        sb.submit("pothos");
        sb.on_focus();
        sb.on_click_outside();
        assert!(!sb.recents_visible());
        assert!(!sb.suggestions_visible());
    }
}
