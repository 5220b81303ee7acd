//! Movie catalog clients for cinesmart.
//!
//! Provides the `MovieCatalog` seam used by the view layer and two
//! implementations of it: the cinesmart web backend and the TMDB API.

/// cinesmart web backend client.
pub mod backend;

/// Catalog trait, listings, and shared movie types.
pub mod catalog;

/// TMDB API client.
pub mod tmdb;

mod http;
