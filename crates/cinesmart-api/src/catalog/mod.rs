//! Movie catalog seam.
//!
//! Defines the async trait the view layer talks to, the listing pages it
//! can request, and the movie shapes both catalog implementations return.

mod api;
mod listing;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieCatalog, MovieCatalog};
pub use listing::{GenreFilter, Listing};
pub use types::{Genre, MovieDetail, MovieSummary};
