//! Card factory, the shared render function, and the `movies` container.

use cinesmart_api::catalog::MovieSummary;
use tokio::sync::watch;

use crate::markup::escape;
use crate::poster::PosterConfig;

/// Element ID of the movie list container.
pub const MOVIES_CONTAINER_ID: &str = "movies";

/// Placeholder text for an empty search result.
pub const NO_RESULTS_MESSAGE: &str = "No movies found";

/// One rendered movie card.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    /// Movie ID used when the card is activated.
    pub movie_id: u64,
    /// Title.
    pub title: String,
    /// Resolved poster URL (CDN or fallback).
    pub poster_url: String,
    /// Vote average.
    pub rating: f64,
    /// Release date, shown below the rating when present.
    pub release_date: Option<String>,
}

impl MovieCard {
    /// Rating line as displayed on the card.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("\u{2b50} {}", self.rating)
    }

    /// "Release Date: 2026-12-18", when the date is known.
    #[must_use]
    pub fn release_label(&self) -> Option<String> {
        self.release_date
            .as_deref()
            .map(|date| format!("Release Date: {date}"))
    }

    /// Markup fragment for this card.
    #[must_use]
    pub fn markup(&self) -> String {
        let title = escape(&self.title);
        let release = self
            .release_label()
            .map(|label| format!("<p>{}</p>", escape(&label)))
            .unwrap_or_default();
        format!(
            r#"<div class="movie-card" data-movie-id="{}"><img src="{}" alt="{} Poster"><h3>{}</h3><p>{}</p>{}</div>"#,
            self.movie_id,
            escape(&self.poster_url),
            title,
            title,
            self.rating_label(),
            release,
        )
    }
}

/// A node inside the movie list container.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A movie card.
    Card(MovieCard),
    /// The empty-state message.
    Placeholder(String),
}

impl Fragment {
    /// Markup fragment for this node.
    #[must_use]
    pub fn markup(&self) -> String {
        match self {
            Self::Card(card) => card.markup(),
            Self::Placeholder(message) => format!("<p>{}</p>", escape(message)),
        }
    }

    /// Visible text of this node, one line per text element.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Card(card) => format!("{}\n{}", card.title, card.rating_label()),
            Self::Placeholder(message) => message.clone(),
        }
    }

    /// Returns the card if this node is one.
    #[must_use]
    pub const fn as_card(&self) -> Option<&MovieCard> {
        match self {
            Self::Card(card) => Some(card),
            Self::Placeholder(_) => None,
        }
    }
}

/// Builds the card for one movie.
#[must_use]
pub fn card(movie: &MovieSummary, posters: &PosterConfig) -> Fragment {
    Fragment::Card(MovieCard {
        movie_id: movie.id,
        title: movie.title.clone(),
        poster_url: posters.poster_url(movie.poster_path.as_deref()),
        rating: movie.vote_average,
        release_date: movie.release_date.clone().filter(|d| !d.is_empty()),
    })
}

/// Replaces the container's content with one card per result, or with a
/// single placeholder carrying `empty_message` when there are none.
pub fn render_results(
    target: &MovieList,
    results: &[MovieSummary],
    empty_message: &str,
    posters: &PosterConfig,
) {
    let fragments = if results.is_empty() {
        vec![Fragment::Placeholder(String::from(empty_message))]
    } else {
        results.iter().map(|movie| card(movie, posters)).collect()
    };
    tracing::debug!(
        container = target.id(),
        nodes = fragments.len(),
        "rendering movie list"
    );
    target.replace(fragments);
}

/// The movie list container.
///
/// Content is published through a `watch` channel so that terminal UIs
/// and tests can observe every replacement.
#[derive(Debug)]
pub struct MovieList {
    /// Element ID.
    id: &'static str,
    /// Current nodes.
    fragments: watch::Sender<Vec<Fragment>>,
}

impl Default for MovieList {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieList {
    /// Creates an empty `movies` container.
    #[must_use]
    pub fn new() -> Self {
        let (fragments, _) = watch::channel(Vec::new());
        Self {
            id: MOVIES_CONTAINER_ID,
            fragments,
        }
    }

    /// Element ID.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Removes all nodes. Observers are notified even if it was empty.
    pub fn clear(&self) {
        self.fragments.send_replace(Vec::new());
    }

    /// Replaces all nodes.
    pub fn replace(&self, fragments: Vec<Fragment>) {
        self.fragments.send_replace(fragments);
    }

    /// Copy of the current nodes.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Fragment> {
        self.fragments.borrow().clone()
    }

    /// Subscribes to content replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Fragment>> {
        self.fragments.subscribe()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.borrow().len()
    }

    /// Whether the container has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.borrow().is_empty()
    }

    /// Cards currently rendered, in order.
    #[must_use]
    pub fn cards(&self) -> Vec<MovieCard> {
        self.fragments
            .borrow()
            .iter()
            .filter_map(Fragment::as_card)
            .cloned()
            .collect()
    }

    /// Card at `index` among the cards, if any.
    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<MovieCard> {
        self.fragments
            .borrow()
            .iter()
            .filter_map(Fragment::as_card)
            .nth(index)
            .cloned()
    }

    /// Markup of the whole container.
    #[must_use]
    pub fn markup(&self) -> String {
        let mut out = format!(r#"<div id="{}">"#, self.id);
        for fragment in self.fragments.borrow().iter() {
            out.push_str(&fragment.markup());
        }
        out.push_str("</div>");
        out
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::float_cmp)]

    use super::*;
    use crate::test_support::summary;

    #[test]
    fn test_card_with_null_poster_uses_fallback() {
        // Arrange
        let movie = summary(5, "X", None, 7.2);

        // Act
        let fragment = card(&movie, &PosterConfig::default());

        // Assert
        let card = fragment.as_card().unwrap();
        assert_eq!(card.movie_id, 5);
        assert_eq!(card.poster_url, "/static/default.jpg");
        assert!(fragment.text().contains('X'));
        assert!(fragment.text().contains("7.2"));
    }

    #[test]
    fn test_card_markup() {
        // Arrange
        let movie = summary(268, "Batman", Some("/b.jpg"), 7.2);

        // Act
        let markup = card(&movie, &PosterConfig::default()).markup();

        // Assert
        assert_eq!(
            markup,
            "<div class=\"movie-card\" data-movie-id=\"268\">\
             <img src=\"https://image.tmdb.org/t/p/w500/b.jpg\" alt=\"Batman Poster\">\
             <h3>Batman</h3><p>\u{2b50} 7.2</p></div>"
        );
    }

    #[test]
    fn test_card_markup_with_release_date() {
        // Arrange
        let mut movie = summary(7, "Dune", None, 8.0);
        movie.release_date = Some(String::from("2026-12-18"));

        // Act
        let markup = card(&movie, &PosterConfig::default()).markup();

        // Assert
        assert!(markup.ends_with("<p>\u{2b50} 8</p><p>Release Date: 2026-12-18</p></div>"));
    }

    #[test]
    fn test_empty_release_date_is_omitted() {
        // Arrange
        let mut movie = summary(7, "Dune", None, 8.0);
        movie.release_date = Some(String::new());

        // Act
        let markup = card(&movie, &PosterConfig::default()).markup();

        // Assert
        assert!(!markup.contains("Release Date"));
    }

    #[test]
    fn test_card_markup_escapes_title() {
        // Arrange
        let movie = summary(1, "<b>Tom & Jerry</b>", None, 6.0);

        // Act
        let markup = card(&movie, &PosterConfig::default()).markup();

        // Assert
        assert!(markup.contains("<h3>&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</h3>"));
        assert!(!markup.contains("<b>"));
    }

    #[test]
    fn test_whole_number_rating_has_no_fraction() {
        // Arrange
        let movie = summary(1, "A", None, 7.0);

        // Act
        let fragment = card(&movie, &PosterConfig::default());

        // Assert
        assert_eq!(fragment.as_card().unwrap().rating_label(), "\u{2b50} 7");
    }

    #[test]
    fn test_render_n_results_gives_n_cards() {
        // Arrange
        let list = MovieList::new();
        let results = vec![
            summary(1, "A", None, 1.0),
            summary(2, "B", None, 2.0),
            summary(3, "C", None, 3.0),
        ];

        // Act
        render_results(&list, &results, NO_RESULTS_MESSAGE, &PosterConfig::default());

        // Assert
        let nodes = list.snapshot();
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| n.as_card().is_some()));
        assert_eq!(list.card_at(2).unwrap().movie_id, 3);
    }

    #[test]
    fn test_render_empty_gives_single_placeholder() {
        // Arrange
        let list = MovieList::new();

        // Act
        render_results(&list, &[], NO_RESULTS_MESSAGE, &PosterConfig::default());

        // Assert
        assert_eq!(
            list.snapshot(),
            vec![Fragment::Placeholder(String::from("No movies found"))]
        );
        assert!(list.cards().is_empty());
        assert_eq!(list.markup(), "<div id=\"movies\"><p>No movies found</p></div>");
    }

    #[test]
    fn test_render_replaces_previous_content() {
        // Arrange
        let list = MovieList::new();
        let posters = PosterConfig::default();
        render_results(&list, &[], NO_RESULTS_MESSAGE, &posters);

        // Act
        render_results(&list, &[summary(9, "Z", None, 5.5)], NO_RESULTS_MESSAGE, &posters);

        // Assert
        assert_eq!(list.len(), 1);
        assert_eq!(list.cards()[0].title, "Z");
    }

    #[test]
    fn test_clear_notifies_observers() {
        // Arrange
        let list = MovieList::new();
        let mut rx = list.subscribe();

        // Act
        list.clear();

        // Assert
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
        assert_eq!(list.id(), "movies");
    }
}
