//! cinesmart web backend client module.
//!
//! The backend proxies TMDB behind `/search` and `/api/*` routes and
//! returns plain JSON without authentication.

mod client;

#[allow(clippy::module_name_repetitions)]
pub use client::{BackendClient, BackendClientBuilder};
