//! JSON-over-HTTP plumbing shared by the catalog clients.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::instrument;
use url::Url;

/// Parses a service-specific error body into a short description.
pub(crate) type ErrorDetail = fn(&str) -> Option<String>;

/// Builds the `reqwest` client used by one catalog endpoint.
///
/// # Errors
///
/// Returns an error if the TLS backend or client configuration fails.
pub(crate) fn build_client(user_agent: &str, timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(user_agent).gzip(true);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build HTTP client")
}

/// Request spacing and 429 handling.
#[derive(Debug)]
pub(crate) struct Pacing {
    /// Minimum spacing between two requests.
    pub(crate) min_interval: Duration,
    /// Retries after HTTP 429 before giving up.
    pub(crate) max_retries: u32,
    /// Backoff unit; the n-th retry waits `n * retry_backoff`.
    pub(crate) retry_backoff: Duration,
}

impl Pacing {
    /// No spacing and no retries.
    pub(crate) const NONE: Self = Self {
        min_interval: Duration::ZERO,
        max_retries: 0,
        retry_backoff: Duration::ZERO,
    };
}

/// One JSON API rooted at a base URL.
#[derive(Debug)]
pub(crate) struct JsonEndpoint {
    http_client: Client,
    base_url: Url,
    /// Service name used in logs and error messages.
    service: &'static str,
    bearer_token: Option<String>,
    /// Query pairs sent with every request.
    default_query: Vec<(&'static str, String)>,
    pacing: Pacing,
    /// When the previous request was sent.
    last_request: Mutex<Option<Instant>>,
    error_detail: Option<ErrorDetail>,
}

impl JsonEndpoint {
    /// Creates an endpoint without auth, pacing, or default query.
    pub(crate) fn new(service: &'static str, http_client: Client, base_url: Url) -> Self {
        Self {
            http_client,
            base_url,
            service,
            bearer_token: None,
            default_query: Vec::new(),
            pacing: Pacing::NONE,
            last_request: Mutex::new(None),
            error_detail: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub(crate) fn bearer(mut self, token: String) -> Self {
        self.bearer_token = Some(token);
        self
    }

    /// Appends `key=value` to every request.
    #[must_use]
    pub(crate) fn default_query(mut self, key: &'static str, value: String) -> Self {
        self.default_query.push((key, value));
        self
    }

    #[must_use]
    pub(crate) const fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Uses `detail` to describe non-success response bodies.
    #[must_use]
    pub(crate) fn error_detail(mut self, detail: ErrorDetail) -> Self {
        self.error_detail = Some(detail);
        self
    }

    pub(crate) const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Waits until `min_interval` has passed since the previous request.
    async fn pace(&self) {
        if self.pacing.min_interval.is_zero() {
            return;
        }
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let remaining = self.pacing.min_interval.saturating_sub(previous.elapsed());
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Sends a GET request for `path` and decodes the JSON body.
    ///
    /// Query values are percent-encoded by `reqwest`. HTTP 429 is retried
    /// up to `max_retries` times; other non-success statuses fail with the
    /// (described) response body.
    #[instrument(skip_all, fields(service = self.service))]
    pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut attempt = 0u32;
        loop {
            self.pace().await;

            let mut request = self.http_client.get(url.clone());
            if let Some(token) = &self.bearer_token {
                request = request.bearer_auth(token);
            }
            let request = request
                .query(&self.default_query)
                .query(query)
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(url = %request.url(), attempt, "{} request", self.service);

            let response = self
                .http_client
                .execute(request)
                .await
                .with_context(|| format!("request failed: {path}"))?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS && attempt < self.pacing.max_retries {
                attempt = attempt.saturating_add(1);
                tracing::warn!(
                    retry = attempt,
                    max_retries = self.pacing.max_retries,
                    "{} rate limited (429), retrying",
                    self.service
                );
                tokio::time::sleep(self.pacing.retry_backoff.saturating_mul(attempt)).await;
                continue;
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {path}"))?;

            if status == StatusCode::TOO_MANY_REQUESTS {
                bail!(
                    "{} rate limit exceeded after {attempt} retries: {path}",
                    self.service
                );
            }
            if !status.is_success() {
                let detail = self
                    .error_detail
                    .and_then(|describe| describe(&body))
                    .unwrap_or(body);
                bail!("{} error (HTTP {status}): {detail}", self.service);
            }

            return serde_json::from_str(&body)
                .with_context(|| format!("failed to decode JSON response: {path}"));
        }
    }
}
