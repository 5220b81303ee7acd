//! `MovieCatalog` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::listing::Listing;
use super::types::{MovieDetail, MovieSummary};

/// Movie catalog trait.
///
/// Abstracts the remote search and detail endpoints so the view layer can
/// run against the web backend, TMDB, or a test double.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieCatalog: Send)]
pub trait LocalMovieCatalog {
    /// Searches movies by free-text query.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>>;

    /// Fetches full details for a single movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, id: u64) -> Result<MovieDetail>;

    /// Fetches one of the fixed listing pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn listing(&self, listing: Listing) -> Result<Vec<MovieSummary>>;
}
