//! `BackendClient` - cinesmart web backend client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::catalog::{Listing, MovieCatalog, MovieDetail, MovieSummary};
use crate::http::{JsonEndpoint, build_client};

/// Default base URL of a locally running backend.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `{ "results": [...] }` envelope of the listing routes.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    results: Vec<MovieSummary>,
}

/// Client for the cinesmart web backend.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BackendClient {
    endpoint: JsonEndpoint,
}

/// Builder for `BackendClient`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct BackendClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl BackendClientBuilder {
    /// Overrides the base URL (default: `http://127.0.0.1:5000/`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<BackendClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };
        let http_client =
            build_client(&user_agent, Some(self.timeout.unwrap_or(DEFAULT_TIMEOUT)))?;

        Ok(BackendClient {
            endpoint: JsonEndpoint::new("backend", http_client, base_url),
        })
    }
}

impl BackendClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BackendClientBuilder {
        BackendClientBuilder::default()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        self.endpoint.base_url()
    }

    /// Route path of a listing page.
    fn listing_path(listing: Listing) -> String {
        match listing {
            Listing::Popular => String::from("api/popular"),
            Listing::Upcoming => String::from("api/upcoming"),
            Listing::TopRated => String::from("api/top_rated"),
            Listing::Genre(genre) => format!("api/genre/{}", genre.id()),
        }
    }
}

impl MovieCatalog for BackendClient {
    #[instrument(skip_all)]
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
        self.endpoint.get_json("search", &[("query", query)]).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, id: u64) -> Result<MovieDetail> {
        self.endpoint
            .get_json(&format!("api/movie/{id}"), &[])
            .await
    }

    #[instrument(skip_all)]
    async fn listing(&self, listing: Listing) -> Result<Vec<MovieSummary>> {
        let path = Self::listing_path(listing);
        let response: ListingResponse = self.endpoint.get_json(&path, &[]).await?;
        Ok(response.results)
    }
}
