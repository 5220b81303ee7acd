//! Debounced search pipeline.
//!
//! Each input change cancels the pending timer and arms a new one. When a
//! timer fires, the current input value is trimmed and either clears the
//! movie list (too short) or is sent to the catalog, whose results replace
//! the list. Requests already in flight are never cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use cinesmart_api::catalog::MovieCatalog;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::poster::PosterConfig;
use crate::render::{MovieList, NO_RESULTS_MESSAGE, render_results};

/// Default quiet period before a search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(600);

/// Default minimum trimmed query length, in characters.
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// What to do with a response whose request has been superseded by a
/// later timer firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleResponsePolicy {
    /// Render every response in arrival order; a slow stale response may
    /// overwrite newer results.
    #[default]
    Render,
    /// Drop responses of superseded requests.
    Discard,
}

/// Pipeline settings.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period after the last input change.
    pub delay: Duration,
    /// Queries shorter than this clear the list instead of searching.
    pub min_query_len: usize,
    /// Handling of superseded responses.
    pub stale_responses: StaleResponsePolicy,
    /// Placeholder text for an empty result.
    pub empty_message: String,
    /// Poster URL settings for rendered cards.
    pub posters: PosterConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            stale_responses: StaleResponsePolicy::default(),
            empty_message: String::from(NO_RESULTS_MESSAGE),
            posters: PosterConfig::default(),
        }
    }
}

/// Handle to the one scheduled timer firing.
#[derive(Debug)]
struct PendingTimer(JoinHandle<()>);

impl PendingTimer {
    fn cancel(self) {
        self.0.abort();
    }

    fn is_armed(&self) -> bool {
        !self.0.is_finished()
    }
}

/// State shared between the pipeline and its spawned tasks.
#[derive(Debug)]
struct Shared<C> {
    catalog: Arc<C>,
    target: Arc<MovieList>,
    config: SearchConfig,
    /// Incremented on every timer firing.
    generation: AtomicU64,
}

/// Debounced search from a text input to the movie list.
#[derive(Debug)]
pub struct DebouncedSearch<C> {
    shared: Arc<Shared<C>>,
    /// Current input value.
    input: watch::Sender<String>,
    pending: Option<PendingTimer>,
}

impl<C> DebouncedSearch<C>
where
    C: MovieCatalog + Sync + 'static,
{
    /// Creates a pipeline that searches `catalog` and renders into `target`.
    #[must_use]
    pub fn new(catalog: Arc<C>, target: Arc<MovieList>, config: SearchConfig) -> Self {
        let (input, _) = watch::channel(String::new());
        Self {
            shared: Arc::new(Shared {
                catalog,
                target,
                config,
                generation: AtomicU64::new(0),
            }),
            input,
            pending: None,
        }
    }

    /// Input event handler. Returns immediately; must be called inside a
    /// tokio runtime.
    pub fn on_input_change(&mut self, raw: impl Into<String>) {
        if let Some(timer) = self.pending.take() {
            timer.cancel();
        }
        self.input.send_replace(raw.into());

        let input = self.input.subscribe();
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(shared.config.delay).await;
            let query = input.borrow().trim().to_owned();
            fire(&shared, query);
        });
        self.pending = Some(PendingTimer(handle));
    }

    /// Current raw input value.
    #[must_use]
    pub fn input_value(&self) -> String {
        self.input.borrow().clone()
    }

    /// Whether a timer is armed and has not fired yet.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(PendingTimer::is_armed)
    }

    /// The movie list this pipeline renders into.
    #[must_use]
    pub fn target(&self) -> &Arc<MovieList> {
        &self.shared.target
    }

    /// Pipeline settings.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.shared.config
    }
}

impl<C> Drop for DebouncedSearch<C> {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.cancel();
        }
    }
}

/// Timer callback: validates the query and starts the request.
fn fire<C>(shared: &Arc<Shared<C>>, query: String)
where
    C: MovieCatalog + Sync + 'static,
{
    let generation = shared
        .generation
        .fetch_add(1, Ordering::SeqCst)
        .wrapping_add(1);

    if query.chars().count() < shared.config.min_query_len {
        tracing::debug!(
            len = query.chars().count(),
            min = shared.config.min_query_len,
            "query too short, clearing results"
        );
        shared.target.clear();
        return;
    }

    tokio::spawn(run_search(Arc::clone(shared), query, generation));
}

/// Issues one search request and renders its outcome.
#[instrument(skip(shared, generation))]
async fn run_search<C>(shared: Arc<Shared<C>>, query: String, generation: u64)
where
    C: MovieCatalog + Sync + 'static,
{
    match shared.catalog.search(&query).await {
        Ok(results) => {
            let latest = shared.generation.load(Ordering::SeqCst);
            if shared.config.stale_responses == StaleResponsePolicy::Discard && latest != generation
            {
                tracing::debug!(generation, latest, "discarding stale search response");
                return;
            }
            tracing::debug!(count = results.len(), "search results received");
            render_results(
                &shared.target,
                &results,
                &shared.config.empty_message,
                &shared.config.posters,
            );
        }
        Err(err) => {
            tracing::warn!(error = format!("{err:#}"), "search request failed");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::render::Fragment;
    use crate::test_support::{FakeCatalog, summary};

    fn pipeline(catalog: &Arc<FakeCatalog>, config: SearchConfig) -> DebouncedSearch<FakeCatalog> {
        DebouncedSearch::new(Arc::clone(catalog), Arc::new(MovieList::new()), config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_clears_without_request() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::default());
        let mut search = pipeline(&catalog, SearchConfig::default());
        search.target().replace(vec![Fragment::Placeholder(String::from("old"))]);
        let mut rx = search.target().subscribe();

        // Act
        search.on_input_change("ba");
        rx.changed().await.unwrap();

        // Assert
        assert!(catalog.searches().is_empty());
        assert!(search.target().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_is_trimmed_before_length_check() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::default());
        let mut search = pipeline(&catalog, SearchConfig::default());
        let mut rx = search.target().subscribe();

        // Act
        search.on_input_change("   ab   ");
        rx.changed().await.unwrap();

        // Assert
        assert!(catalog.searches().is_empty());
        assert_eq!(search.input_value(), "   ab   ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_within_window_issues_only_latest() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::with_results(
            "batman",
            vec![summary(268, "Batman", None, 7.2)],
        ));
        let mut search = pipeline(&catalog, SearchConfig::default());
        let mut rx = search.target().subscribe();

        // Act
        search.on_input_change("bat");
        tokio::time::sleep(Duration::from_millis(300)).await;
        search.on_input_change("batman");
        rx.changed().await.unwrap();

        // Assert
        assert_eq!(catalog.searches(), vec![String::from("batman")]);
        assert_eq!(search.target().cards()[0].movie_id, 268);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_requests_only_last_value() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::default());
        let mut search = pipeline(&catalog, SearchConfig::default());
        let mut rx = search.target().subscribe();

        // Act
        for value in ["s", "sp", "spi", "spir", "spiri", "spirit"] {
            search.on_input_change(value);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        rx.changed().await.unwrap();

        // Assert
        assert_eq!(catalog.searches(), vec![String::from("spirit")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_changes_each_issue_a_request() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::default());
        let mut search = pipeline(&catalog, SearchConfig::default());

        // Act
        search.on_input_change("alien");
        tokio::time::sleep(Duration::from_millis(700)).await;
        search.on_input_change("aliens");
        tokio::time::sleep(Duration::from_millis(700)).await;

        // Assert
        assert_eq!(
            catalog.searches(),
            vec![String::from("alien"), String::from("aliens")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_response_renders_placeholder() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::default());
        let mut search = pipeline(&catalog, SearchConfig::default());
        let mut rx = search.target().subscribe();

        // Act
        search.on_input_change("zzzzzz");
        rx.changed().await.unwrap();

        // Assert
        assert_eq!(
            search.target().snapshot(),
            vec![Fragment::Placeholder(String::from("No movies found"))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_poster_card_uses_fallback() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::with_results(
            "xxx",
            vec![summary(5, "X", None, 7.2)],
        ));
        let mut search = pipeline(&catalog, SearchConfig::default());
        let mut rx = search.target().subscribe();

        // Act
        search.on_input_change("xxx");
        rx.changed().await.unwrap();

        // Assert
        let nodes = search.target().snapshot();
        assert_eq!(nodes.len(), 1);
        let card = nodes[0].as_card().unwrap();
        assert_eq!(card.poster_url, "/static/default.jpg");
        assert!(nodes[0].text().contains('X'));
        assert!(nodes[0].text().contains("7.2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_keeps_previous_content() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::failing());
        let mut search = pipeline(&catalog, SearchConfig::default());
        let previous = vec![Fragment::Placeholder(String::from("previous"))];
        search.target().replace(previous.clone());

        // Act
        search.on_input_change("batman");
        tokio::time::sleep(Duration::from_secs(2)).await;

        // Assert
        assert_eq!(catalog.searches(), vec![String::from("batman")]);
        assert_eq!(search.target().snapshot(), previous);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_delay_and_threshold() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::default());
        let config = SearchConfig {
            delay: Duration::from_millis(700),
            min_query_len: 2,
            ..SearchConfig::default()
        };
        let mut search = pipeline(&catalog, config);

        // Act
        search.on_input_change("up");
        tokio::time::sleep(Duration::from_millis(650)).await;
        let armed_before_delay = search.has_pending();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Assert
        assert!(armed_before_delay);
        assert!(!search.has_pending());
        assert_eq!(catalog.searches(), vec![String::from("up")]);
    }

    /// Slow response for "slow" arrives after the fast one for "fast".
    fn racing_catalog() -> FakeCatalog {
        let mut catalog = FakeCatalog::default();
        catalog
            .results
            .insert(String::from("slow"), vec![summary(1, "Slow", None, 1.0)]);
        catalog
            .results
            .insert(String::from("fast"), vec![summary(2, "Fast", None, 2.0)]);
        catalog
            .latency
            .insert(String::from("slow"), Duration::from_millis(1_000));
        catalog
            .latency
            .insert(String::from("fast"), Duration::from_millis(10));
        catalog
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_renders_in_arrival_order_by_default() {
        // Arrange
        let catalog = Arc::new(racing_catalog());
        let mut search = pipeline(&catalog, SearchConfig::default());

        // Act
        search.on_input_change("slow");
        tokio::time::sleep(Duration::from_millis(700)).await;
        search.on_input_change("fast");
        tokio::time::sleep(Duration::from_secs(3)).await;

        // Assert
        assert_eq!(
            catalog.searches(),
            vec![String::from("slow"), String::from("fast")]
        );
        assert_eq!(search.target().cards()[0].title, "Slow");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_discarded_when_configured() {
        // Arrange
        let catalog = Arc::new(racing_catalog());
        let config = SearchConfig {
            stale_responses: StaleResponsePolicy::Discard,
            ..SearchConfig::default()
        };
        let mut search = pipeline(&catalog, config);

        // Act
        search.on_input_change("slow");
        tokio::time::sleep(Duration::from_millis(700)).await;
        search.on_input_change("fast");
        tokio::time::sleep(Duration::from_secs(3)).await;

        // Assert
        assert_eq!(search.target().cards()[0].title, "Fast");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        // Arrange
        let catalog = Arc::new(FakeCatalog::default());
        let mut search = pipeline(&catalog, SearchConfig::default());

        // Act
        search.on_input_change("batman");
        drop(search);
        tokio::time::sleep(Duration::from_secs(2)).await;

        // Assert
        assert!(catalog.searches().is_empty());
    }

    #[test]
    fn test_stale_policy_serde_names() {
        // Arrange & Act
        let parsed: StaleResponsePolicy = serde_json::from_str(r#""discard""#).unwrap();

        // Assert
        assert_eq!(parsed, StaleResponsePolicy::Discard);
        assert_eq!(
            serde_json::to_string(&StaleResponsePolicy::Render).unwrap(),
            r#""render""#
        );
    }
}
