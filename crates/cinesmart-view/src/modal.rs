//! Movie detail modal.

use cinesmart_api::catalog::MovieDetail;
use tokio::sync::watch;

use crate::markup::escape;
use crate::poster::PosterConfig;

/// Element ID of the modal overlay.
pub const MODAL_ID: &str = "movie-detail-modal";

/// Element ID of the modal body.
pub const MODAL_BODY_ID: &str = "modal-body";

/// Element ID of the close button.
pub const CLOSE_BUTTON_ID: &str = "close-modal";

/// Content of the modal body for one movie.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBody {
    /// Movie ID.
    pub movie_id: u64,
    /// Title.
    pub title: String,
    /// Backdrop (or poster) image URL.
    pub image_url: String,
    /// Poster image URL.
    pub poster_url: String,
    /// Vote average.
    pub rating: f64,
    /// Release date, if known.
    pub release_date: Option<String>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Overview text (empty when the catalog has none).
    pub overview: String,
}

impl DetailBody {
    /// Builds the body from catalog details.
    #[must_use]
    pub fn from_detail(detail: &MovieDetail, posters: &PosterConfig) -> Self {
        Self {
            movie_id: detail.id,
            title: detail.title.clone(),
            image_url: posters.backdrop_url(
                detail.backdrop_path.as_deref(),
                detail.poster_path.as_deref(),
            ),
            poster_url: posters.poster_url(detail.poster_path.as_deref()),
            rating: detail.vote_average,
            release_date: detail.release_date.clone().filter(|d| !d.is_empty()),
            genres: detail.genre_names().into_iter().map(String::from).collect(),
            overview: detail.overview.clone().unwrap_or_default(),
        }
    }

    /// "Rating: 7.2 / 10".
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("Rating: {} / 10", self.rating)
    }

    /// "Release Date: 1989-06-21", or `-` when unknown.
    #[must_use]
    pub fn release_label(&self) -> String {
        format!(
            "Release Date: {}",
            self.release_date.as_deref().unwrap_or("-")
        )
    }

    /// Markup of the body content (without the `modal-body` wrapper).
    #[must_use]
    pub fn markup(&self) -> String {
        let title = escape(&self.title);
        let genres: String = self
            .genres
            .iter()
            .map(|g| format!("<span>{}</span>", escape(g)))
            .collect();
        format!(
            concat!(
                r#"<img src="{image}" alt="{title} Image">"#,
                "<h2>{title}</h2>",
                r#"<p class="rating">{rating}</p>"#,
                r#"<p class="release-date">{release}</p>"#,
                r#"<div class="genres">{genres}</div>"#,
                "<p>{overview}</p>",
            ),
            image = escape(&self.image_url),
            title = title,
            rating = self.rating_label(),
            release = escape(&self.release_label()),
            genres = genres,
            overview = escape(&self.overview),
        )
    }
}

/// Observable modal state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    /// Whether the overlay is displayed.
    pub visible: bool,
    /// Last populated body; kept while hidden.
    pub body: Option<DetailBody>,
}

/// The detail surface shared by every card on the page.
#[derive(Debug)]
pub struct MovieModal {
    state: watch::Sender<ModalState>,
}

impl Default for MovieModal {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieModal {
    /// Creates a hidden, empty modal.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(ModalState::default());
        Self { state }
    }

    /// Populates the body and displays the modal.
    pub fn show(&self, body: DetailBody) {
        tracing::debug!(movie_id = body.movie_id, "showing detail modal");
        self.state.send_modify(|state| {
            state.body = Some(body);
            state.visible = true;
        });
    }

    /// Hides the modal. Does nothing if it is already hidden.
    pub fn close(&self) {
        self.state.send_if_modified(|state| {
            if state.visible {
                state.visible = false;
                true
            } else {
                false
            }
        });
    }

    /// Handles a click on `element_id`.
    ///
    /// The close button and the overlay itself (a click outside the body)
    /// close the modal; anything else is ignored. Returns whether the
    /// click was a close request.
    pub fn handle_click(&self, element_id: &str) -> bool {
        if element_id == CLOSE_BUTTON_ID || element_id == MODAL_ID {
            self.close();
            true
        } else {
            false
        }
    }

    /// Whether the modal is displayed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// Copy of the current state.
    #[must_use]
    pub fn state(&self) -> ModalState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
        self.state.subscribe()
    }

    /// Markup of the whole modal.
    #[must_use]
    pub fn markup(&self) -> String {
        let state = self.state.borrow();
        let display = if state.visible { "block" } else { "none" };
        let body = state.body.as_ref().map(DetailBody::markup).unwrap_or_default();
        format!(
            r#"<div id="{MODAL_ID}" class="modal" style="display:{display}"><div class="modal-content"><span id="{CLOSE_BUTTON_ID}" class="close">&times;</span><div id="{MODAL_BODY_ID}">{body}</div></div></div>"#
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::test_support::detail;

    fn body() -> DetailBody {
        DetailBody::from_detail(&detail(129, "Spirited Away"), &PosterConfig::default())
    }

    #[test]
    fn test_new_modal_is_hidden() {
        // Arrange & Act
        let modal = MovieModal::new();

        // Assert
        assert!(!modal.is_visible());
        assert!(modal.state().body.is_none());
        assert!(modal.markup().contains("display:none"));
    }

    #[test]
    fn test_show_populates_and_displays() {
        // Arrange
        let modal = MovieModal::new();

        // Act
        modal.show(body());

        // Assert
        assert!(modal.is_visible());
        let markup = modal.markup();
        assert!(markup.contains("display:block"));
        assert!(markup.contains("<h2>Spirited Away</h2>"));
        assert!(markup.contains("Rating: 8.1 / 10"));
        assert!(markup.contains("Release Date: 2001-07-20"));
        assert!(markup.contains("<span>Animation</span><span>Fantasy</span>"));
        assert!(markup.contains(r#"src="/static/default.jpg""#));
    }

    #[test]
    fn test_close_when_already_closed_is_noop() {
        // Arrange
        let modal = MovieModal::new();
        let mut rx = modal.subscribe();

        // Act
        modal.close();
        modal.close();

        // Assert
        assert!(!modal.is_visible());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_close_hides_but_keeps_body() {
        // Arrange
        let modal = MovieModal::new();
        modal.show(body());

        // Act
        modal.close();

        // Assert
        assert!(!modal.is_visible());
        assert_eq!(modal.state().body.unwrap().movie_id, 129);
    }

    #[test]
    fn test_click_targets() {
        // Arrange
        let modal = MovieModal::new();
        modal.show(body());

        // Act & Assert: clicks inside the body keep it open
        assert!(!modal.handle_click(MODAL_BODY_ID));
        assert!(modal.is_visible());

        // Act & Assert: overlay click closes
        assert!(modal.handle_click(MODAL_ID));
        assert!(!modal.is_visible());

        // Act & Assert: close button on a closed modal is harmless
        assert!(modal.handle_click(CLOSE_BUTTON_ID));
        assert!(!modal.is_visible());
    }

    #[test]
    fn test_missing_release_date_label() {
        // Arrange
        let mut detail = detail(1, "A");
        detail.release_date = Some(String::new());

        // Act
        let body = DetailBody::from_detail(&detail, &PosterConfig::default());

        // Assert
        assert_eq!(body.release_label(), "Release Date: -");
    }
}
