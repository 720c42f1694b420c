//! # Sitemap XML Library
//!
//! Builds and serves XML sitemaps for a dynamic, possibly very large, set of URLs.
//!
//! The caller supplies the URLs (via a [`UrlSource`]) and a base origin. The
//! library splits the URLs into documents of at most `size` entries, adds a
//! sitemap index when more than one document is needed, and caches the result
//! for `max_age` so that concurrent requests share one rebuild.
//!
//! ## Features
//!
//! - Resolve site-relative paths against a base origin with a nested path
//! - Optional `<lastmod>`, `<changefreq>` and image annotations per URL
//! - Automatic pagination into `/sitemap-N.xml` chunks plus an index at `/sitemap.xml`
//! - Single-flight, time-bounded refresh cache
//!
//! ## Examples
//!
//! ### Static generation
//!
//! ```
//! use core_smx::{UrlEntry, UrlRecord, build_sitemaps};
//!
//! let urls: Vec<UrlEntry> = vec![
//!     "/".into(),
//!     UrlRecord::new("/about").change_freq("monthly").into(),
//! ];
//! let sitemaps = build_sitemaps(&urls, "https://example.com", None).unwrap();
//! assert!(sitemaps.get("/sitemap.xml").unwrap().contains("<loc>https://example.com/about</loc>"));
//! ```
//!
//! ### Cached serving
//!
//! ```no_run
//! use core_smx::{SitemapOptions, SitemapService, UrlEntry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = SitemapService::from_fn(
//!         || async { Ok(vec![UrlEntry::from("/1"), UrlEntry::from("/2")]) },
//!         "https://example.com",
//!         SitemapOptions::builder().size(1).build(),
//!     )?;
//!
//!     let index = service.lookup("/sitemap.xml").await?;
//!     println!("{}", index.unwrap_or_default());
//!     Ok(())
//! }
//! ```

// Module declarations
mod cache;
mod clock;
mod config;
mod documents;
mod entry;
mod errors;
mod logging;
mod render;
mod resolve;
mod service;
pub mod sitemap;
mod source;

// Public API re-exports
pub use config::{MAX_SITEMAP_LENGTH, SITEMAP_MAX_AGE, SitemapOptions, SitemapOptionsBuilder, validate_size};
pub use documents::{DocumentSet, ROOT_PATH, SitemapBuilder, SitemapDocument, build_documents, build_sitemaps, chunk_path};
pub use entry::{LastMod, UrlEntry, UrlRecord, format_date, parse_entries};
pub use errors::{Result, SitemapError};
pub use service::SitemapService;
pub use source::{FnSource, JsonFileSource, StaticSource, UrlSource};

// Additional exports for advanced usage
pub use cache::RefreshCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{DEFAULT_LOG_SETTINGS, setup_logging};
pub use render::{Element, render_document};
pub use resolve::Base;
