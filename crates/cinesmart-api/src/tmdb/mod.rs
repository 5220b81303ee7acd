//! TMDB API client module.
//!
//! Talks to the TMDB API v3 directly (search, details, listing pages)
//! and exposes it through the `MovieCatalog` trait.

mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{TmdbErrorResponse, TmdbMovieListResponse};
