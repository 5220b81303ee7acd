//! Fixed listing pages (popular, upcoming, top rated, per genre).

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

/// Genre pages, keyed by their TMDB genre IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenreFilter {
    /// Action (28).
    Action,
    /// Adventure (12).
    Adventure,
    /// Animation (16).
    Animation,
    /// Comedy (35).
    Comedy,
    /// Drama (18).
    Drama,
    /// Fantasy (14).
    Fantasy,
    /// Horror (27).
    Horror,
    /// Mystery (9648).
    Mystery,
    /// Romance (10749).
    Romance,
    /// Science Fiction (878).
    ScienceFiction,
}

impl GenreFilter {
    /// All genre pages in menu order.
    pub const ALL: [Self; 10] = [
        Self::Action,
        Self::Adventure,
        Self::Animation,
        Self::Comedy,
        Self::Drama,
        Self::Fantasy,
        Self::Horror,
        Self::Mystery,
        Self::Romance,
        Self::ScienceFiction,
    ];

    /// TMDB genre ID.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Action => 28,
            Self::Adventure => 12,
            Self::Animation => 16,
            Self::Comedy => 35,
            Self::Drama => 18,
            Self::Fantasy => 14,
            Self::Horror => 27,
            Self::Mystery => 9648,
            Self::Romance => 10749,
            Self::ScienceFiction => 878,
        }
    }

    /// Short page name used on the command line (`scifi`, `action`, ...).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Adventure => "adventure",
            Self::Animation => "animation",
            Self::Comedy => "comedy",
            Self::Drama => "drama",
            Self::Fantasy => "fantasy",
            Self::Horror => "horror",
            Self::Mystery => "mystery",
            Self::Romance => "romance",
            Self::ScienceFiction => "scifi",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Animation => "Animation",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Fantasy => "Fantasy",
            Self::Horror => "Horror",
            Self::Mystery => "Mystery",
            Self::Romance => "Romance",
            Self::ScienceFiction => "Science Fiction",
        }
    }
}

impl FromStr for GenreFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "science-fiction" || wanted == "sci-fi" {
            return Ok(Self::ScienceFiction);
        }
        if let Some(genre) = Self::ALL.into_iter().find(|g| g.slug() == wanted) {
            return Ok(genre);
        }
        let known: Vec<&str> = Self::ALL.iter().map(|g| g.slug()).collect();
        bail!("unknown genre '{s}' (expected one of: {})", known.join(", "))
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    /// Currently popular movies.
    Popular,
    /// Upcoming releases.
    Upcoming,
    /// Highest rated movies.
    TopRated,
    /// Movies of one genre.
    Genre(GenreFilter),
}

impl Listing {
    /// Page heading.
    #[must_use]
    pub fn heading(self) -> String {
        match self {
            Self::Popular => String::from("Popular Movies"),
            Self::Upcoming => String::from("Upcoming Movies"),
            Self::TopRated => String::from("Top Rated Movies"),
            Self::Genre(genre) => format!("{} Movies", genre.name()),
        }
    }

    /// Message rendered when the listing comes back empty.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Upcoming => "No upcoming movies",
            Self::Popular | Self::TopRated | Self::Genre(_) => "No movies found",
        }
    }
}
