//! View layer for cinesmart.
//!
//! Renders movie lists into the `movies` container, drives the detail
//! modal, and runs the debounced search pipeline that connects a text
//! input to the catalog search endpoint.

/// Card activation and detail fetching.
pub mod detail;
/// Listing pages (popular, upcoming, top rated, genre).
pub mod listing;
/// Markup escaping helpers.
pub mod markup;
/// Movie detail modal.
pub mod modal;
/// Debounced search pipeline.
pub mod pipeline;
/// Poster and backdrop URL construction.
pub mod poster;
/// Card factory, render function, and the movie list container.
pub mod render;

#[cfg(test)]
pub(crate) mod test_support;

pub use detail::DetailController;
pub use listing::load_listing;
pub use modal::{DetailBody, ModalState, MovieModal};
pub use pipeline::{DebouncedSearch, SearchConfig, StaleResponsePolicy};
pub use poster::PosterConfig;
pub use render::{Fragment, MovieCard, MovieList, card, render_results};
