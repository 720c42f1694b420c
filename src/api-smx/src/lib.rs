//! HTTP layer for serving sitemaps.
//!
//! [`routes::with_sitemaps`] puts the sitemap middleware in front of any axum
//! router; [`routes::router`] is the standalone sitemap server used by the binary.

pub mod config;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
