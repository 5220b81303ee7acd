//! TMDB API response types.

use serde::Deserialize;

use crate::catalog::MovieSummary;

/// Paged movie list returned by `search/movie`, `movie/popular`,
/// `movie/upcoming`, `movie/top_rated` and `discover/movie`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

impl TmdbErrorResponse {
    /// Describes an error body as `code=N, message=...`, or `None` when it
    /// is not a TMDB error document.
    pub(crate) fn describe(body: &str) -> Option<String> {
        let error: Self = serde_json::from_str(body).ok()?;
        Some(format!(
            "code={}, message={}",
            error.status_code, error.status_message
        ))
    }
}
