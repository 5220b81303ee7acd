//! Application configuration module.
//!
//! Manages the TOML config file holding search, source, and poster
//! settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, SourceKind};
pub use paths::{resolve_config_dir, resolve_config_path};
