//! Movie shapes shared by all catalog implementations.

use serde::Deserialize;

/// A movie as it appears in search results and listing pages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// Catalog movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path (e.g. `/abc.jpg`), absent or null when missing.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
}

/// Full movie details shown in the detail surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetail {
    /// Catalog movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl MovieDetail {
    /// Returns the genre names in catalog order.
    #[must_use]
    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}
