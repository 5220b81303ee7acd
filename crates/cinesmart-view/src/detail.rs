//! Card activation: fetch one movie's details and show the modal.

use std::sync::Arc;

use cinesmart_api::catalog::MovieCatalog;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::modal::{DetailBody, MovieModal};
use crate::poster::PosterConfig;

/// Opens the detail modal for activated cards.
///
/// Independent of the search pipeline; listing pages and search results
/// share one controller and one modal.
#[derive(Debug)]
pub struct DetailController<C> {
    catalog: Arc<C>,
    modal: Arc<MovieModal>,
    posters: Arc<PosterConfig>,
}

impl<C> Clone for DetailController<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            modal: Arc::clone(&self.modal),
            posters: Arc::clone(&self.posters),
        }
    }
}

impl<C> DetailController<C>
where
    C: MovieCatalog + Sync + 'static,
{
    /// Creates a controller that populates `modal`.
    #[must_use]
    pub fn new(catalog: Arc<C>, modal: Arc<MovieModal>, posters: PosterConfig) -> Self {
        Self {
            catalog,
            modal,
            posters: Arc::new(posters),
        }
    }

    /// The modal this controller populates.
    #[must_use]
    pub const fn modal(&self) -> &Arc<MovieModal> {
        &self.modal
    }

    /// Requests details for `movie_id` and shows them.
    ///
    /// On failure the error is logged and the modal is left untouched.
    /// Returns whether the modal was shown.
    #[instrument(skip(self))]
    pub async fn open_movie(&self, movie_id: u64) -> bool {
        match self.catalog.movie_details(movie_id).await {
            Ok(detail) => {
                self.modal.show(DetailBody::from_detail(&detail, &self.posters));
                true
            }
            Err(err) => {
                tracing::warn!(
                    movie_id,
                    error = format!("{err:#}"),
                    "failed to fetch movie details"
                );
                false
            }
        }
    }

    /// Card click handler: opens the movie in a background task.
    pub fn activate(&self, movie_id: u64) -> JoinHandle<bool> {
        let this = self.clone();
        tokio::spawn(async move { this.open_movie(movie_id).await })
    }
}
