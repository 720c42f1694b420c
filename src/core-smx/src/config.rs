//! Configuration options for building and caching sitemaps.

use std::time::Duration;

use crate::errors::{Result, SitemapError};

/// Maximum number of URLs in one sitemap document (sitemaps.org limit).
pub const MAX_SITEMAP_LENGTH: usize = 50_000;

/// How long a built document set is served before it is rebuilt.
pub const SITEMAP_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration options for the sitemap service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapOptions {
    /// Maximum number of URLs per sitemap document (default: 50,000)
    pub size: usize,
    /// How long a built document set stays fresh (default: 24 hours)
    pub max_age: Duration,
}

impl Default for SitemapOptions {
    fn default() -> Self {
        Self {
            size: MAX_SITEMAP_LENGTH,
            max_age: SITEMAP_MAX_AGE,
        }
    }
}

impl SitemapOptions {
    /// Creates a new builder for SitemapOptions.
    pub fn builder() -> SitemapOptionsBuilder {
        SitemapOptionsBuilder::default()
    }

    /// Fails if the chunk capacity is not a positive integer.
    pub fn validate(&self) -> Result<()> {
        validate_size(self.size).map(|_| ())
    }
}

/// Returns `size` if it can be used as a chunk capacity.
pub fn validate_size(size: usize) -> Result<usize> {
    if size == 0 {
        Err(SitemapError::InvalidSize(size))
    } else {
        Ok(size)
    }
}

/// Builder for SitemapOptions.
#[derive(Debug, Clone, Default)]
pub struct SitemapOptionsBuilder {
    size: Option<usize>,
    max_age: Option<Duration>,
}

impl SitemapOptionsBuilder {
    /// Sets the maximum number of URLs per sitemap document.
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets how long a built document set stays fresh.
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Sets how long a built document set stays fresh, in milliseconds.
    pub fn max_age_ms(self, millis: u64) -> Self {
        self.max_age(Duration::from_millis(millis))
    }

    /// Builds the SitemapOptions.
    pub fn build(self) -> SitemapOptions {
        SitemapOptions {
            size: self.size.unwrap_or(MAX_SITEMAP_LENGTH),
            max_age: self.max_age.unwrap_or(SITEMAP_MAX_AGE),
        }
    }
}
