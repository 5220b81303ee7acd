//! Poster and backdrop URL construction.

use serde::{Deserialize, Serialize};

/// Image CDN settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    /// CDN prefix, ending with `/`.
    pub base_url: String,
    /// Width segment for card and modal posters.
    pub size: String,
    /// Width segment for modal backdrops.
    pub backdrop_size: String,
    /// Image shown when a movie has no poster.
    pub fallback: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://image.tmdb.org/t/p/"),
            size: String::from("w500"),
            backdrop_size: String::from("w780"),
            fallback: String::from("/static/default.jpg"),
        }
    }
}

impl PosterConfig {
    /// Builds the poster URL, or returns the fallback image when the
    /// path is absent or empty.
    #[must_use]
    pub fn poster_url(&self, poster_path: Option<&str>) -> String {
        self.image_url(&self.size, poster_path)
    }

    /// Builds the backdrop URL, falling back to the poster image and then
    /// to the fallback image.
    #[must_use]
    pub fn backdrop_url(&self, backdrop_path: Option<&str>, poster_path: Option<&str>) -> String {
        match non_empty(backdrop_path) {
            Some(path) => self.image_url(&self.backdrop_size, Some(path)),
            None => self.image_url(&self.backdrop_size, poster_path),
        }
    }

    fn image_url(&self, size: &str, path: Option<&str>) -> String {
        non_empty(path).map_or_else(
            || self.fallback.clone(),
            |p| format!("{}{}{}", self.base_url, size, p),
        )
    }
}

fn non_empty(path: Option<&str>) -> Option<&str> {
    path.map(str::trim).filter(|p| !p.is_empty())
}
