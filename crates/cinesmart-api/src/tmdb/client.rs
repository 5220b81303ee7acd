//! `TmdbClient` - movie endpoints of the TMDB API v3.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::instrument;
use url::Url;

use super::types::{TmdbErrorResponse, TmdbMovieListResponse};
use crate::catalog::{Listing, MovieCatalog, MovieDetail, MovieSummary};
use crate::http::{JsonEndpoint, Pacing, build_client};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Default minimum interval between requests (TMDB allows ~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Default backoff unit between 429 retries.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    endpoint: JsonEndpoint,
}

/// Builder for `TmdbClient`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    min_interval: Option<Duration>,
    retry_backoff: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Sets the 429 backoff unit (default: 1s, growing linearly per retry).
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };

        let endpoint = JsonEndpoint::new("TMDB API", build_client(&user_agent, None)?, base_url)
            .bearer(api_token)
            .default_query(
                "language",
                self.language
                    .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            )
            .pacing(Pacing {
                min_interval: self.min_interval.unwrap_or(DEFAULT_MIN_INTERVAL),
                max_retries: MAX_RETRIES,
                retry_backoff: self.retry_backoff.unwrap_or(RETRY_BACKOFF),
            })
            .error_detail(TmdbErrorResponse::describe);

        Ok(TmdbClient { endpoint })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::default()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        self.endpoint.base_url()
    }

    /// Fetches the first page of a paged movie list.
    async fn movie_list(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<MovieSummary>> {
        let page: TmdbMovieListResponse = self.endpoint.get_json(path, query).await?;
        tracing::debug!(
            path,
            total_results = page.total_results,
            total_pages = page.total_pages,
            "TMDB movie list fetched"
        );
        Ok(page.results)
    }
}

impl MovieCatalog for TmdbClient {
    #[instrument(skip_all)]
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
        let params = [("query", query), ("page", "1"), ("include_adult", "false")];
        self.movie_list("search/movie", &params).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, id: u64) -> Result<MovieDetail> {
        self.endpoint.get_json(&format!("movie/{id}"), &[]).await
    }

    #[instrument(skip_all)]
    async fn listing(&self, listing: Listing) -> Result<Vec<MovieSummary>> {
        match listing {
            Listing::Popular => self.movie_list("movie/popular", &[]).await,
            Listing::Upcoming => self.movie_list("movie/upcoming", &[]).await,
            Listing::TopRated => self.movie_list("movie/top_rated", &[]).await,
            Listing::Genre(genre) => {
                let genre_id = genre.id().to_string();
                let params = [
                    ("with_genres", genre_id.as_str()),
                    ("sort_by", "popularity.desc"),
                ];
                self.movie_list("discover/movie", &params).await
            }
        }
    }
}
