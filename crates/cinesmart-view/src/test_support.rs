//! Test doubles shared by the view tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, bail};
use cinesmart_api::catalog::{Listing, MovieCatalog, MovieDetail, MovieSummary};

/// Builds a movie summary.
pub fn summary(id: u64, title: &str, poster_path: Option<&str>, vote_average: f64) -> MovieSummary {
    MovieSummary {
        id,
        title: String::from(title),
        poster_path: poster_path.map(String::from),
        vote_average,
        release_date: None,
        overview: None,
    }
}

/// Builds a movie detail.
pub fn detail(id: u64, title: &str) -> MovieDetail {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "overview": "A test overview.",
        "poster_path": null,
        "vote_average": 8.1,
        "release_date": "2001-07-20",
        "genres": [{"id": 16, "name": "Animation"}, {"id": 14, "name": "Fantasy"}]
    }))
    .unwrap()
}

/// In-memory catalog that records every request.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    /// Search results per query; unknown queries return no results.
    pub results: HashMap<String, Vec<MovieSummary>>,
    /// Artificial response latency per query.
    pub latency: HashMap<String, Duration>,
    /// Listing results.
    pub listing: Vec<MovieSummary>,
    /// Whether every request fails.
    pub fail: bool,
    /// Queries received, in order.
    pub searches: Mutex<Vec<String>>,
    /// Detail IDs received, in order.
    pub details: Mutex<Vec<u64>>,
    /// Listings received, in order.
    pub listings: Mutex<Vec<Listing>>,
}

impl FakeCatalog {
    /// Catalog that answers `query` with `results`.
    pub fn with_results(query: &str, results: Vec<MovieSummary>) -> Self {
        let mut catalog = Self::default();
        catalog.results.insert(String::from(query), results);
        catalog
    }

    /// Catalog whose requests all fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Queries received so far.
    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    /// Detail IDs received so far.
    pub fn details(&self) -> Vec<u64> {
        self.details.lock().unwrap().clone()
    }
}

impl MovieCatalog for FakeCatalog {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
        self.searches.lock().unwrap().push(String::from(query));
        if let Some(latency) = self.latency.get(query).copied() {
            tokio::time::sleep(latency).await;
        }
        if self.fail {
            bail!("connection refused");
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetail> {
        self.details.lock().unwrap().push(id);
        if self.fail {
            bail!("connection refused");
        }
        Ok(detail(id, "Spirited Away"))
    }

    async fn listing(&self, listing: Listing) -> Result<Vec<MovieSummary>> {
        self.listings.lock().unwrap().push(listing);
        if self.fail {
            bail!("connection refused");
        }
        Ok(self.listing.clone())
    }
}
