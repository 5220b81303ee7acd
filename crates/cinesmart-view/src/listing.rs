//! Listing pages.

use cinesmart_api::catalog::{Listing, LocalMovieCatalog};
use tracing::instrument;

use crate::poster::PosterConfig;
use crate::render::{MovieList, render_results};

/// Fetches a listing page and renders it into `target`.
///
/// On failure the error is logged and `target` keeps its content.
/// Returns whether the page was rendered.
#[allow(clippy::future_not_send)]
#[instrument(skip(catalog, target, posters))]
pub async fn load_listing(
    catalog: &(impl LocalMovieCatalog + Sync),
    listing: Listing,
    target: &MovieList,
    posters: &PosterConfig,
) -> bool {
    match catalog.listing(listing).await {
        Ok(movies) => {
            tracing::debug!(count = movies.len(), "listing fetched");
            render_results(target, &movies, listing.empty_message(), posters);
            true
        }
        Err(err) => {
            tracing::warn!(
                listing = %listing.heading(),
                error = format!("{err:#}"),
                "failed to fetch listing"
            );
            false
        }
    }
}
