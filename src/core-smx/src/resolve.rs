//! Absolute URL resolution against a base origin.

use url::Url;

use crate::errors::{Result, SitemapError};

/// A validated base origin that site-relative entries resolve under.
///
/// The base path's trailing slashes are insignificant: `https://example.com/cars/`
/// and `https://example.com/cars` resolve `/sitemap-0.xml` to the same location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base {
    origin: Url,
    prefix: String,
}

impl Base {
    /// Parses a base origin. Fails unless `base` is an absolute, hierarchical URL.
    ///
    /// # Examples
    ///
    /// ```
    /// # use core_smx::Base;
    /// assert!(Base::parse("https://example.com/docs/").is_ok());
    /// assert!(Base::parse("/docs").is_err());
    /// assert!(Base::parse("mailto:someone@example.com").is_err());
    /// ```
    pub fn parse(base: &str) -> Result<Self> {
        let parsed = Url::parse(base).map_err(|e| SitemapError::InvalidBase {
            base: base.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(SitemapError::InvalidBase {
                base: base.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let prefix = parsed.path().trim_end_matches('/').to_string();
        let mut origin = parsed;
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);

        Ok(Self { origin, prefix })
    }

    /// Resolves `url` to an absolute URL string.
    ///
    /// Absolute URLs pass through (normalized by the URL parser). Site-relative
    /// paths are appended to the base path. The empty string links to the base
    /// path itself.
    ///
    /// # Examples
    ///
    /// ```
    /// # use core_smx::Base;
    /// let base = Base::parse("https://example.com/cars/sitemap/").unwrap();
    /// assert_eq!(
    ///     base.resolve("/sitemap-0.xml").unwrap(),
    ///     "https://example.com/cars/sitemap/sitemap-0.xml"
    /// );
    /// assert_eq!(base.resolve("https://other.org/x").unwrap(), "https://other.org/x");
    /// ```
    pub fn resolve(&self, url: &str) -> Result<String> {
        if let Ok(absolute) = Url::parse(url) {
            return Ok(absolute.into());
        }

        let relative = if url.is_empty() || url.starts_with('/') {
            format!("{}{}", self.prefix, url)
        } else {
            format!("{}/{}", self.prefix, url)
        };

        self.origin
            .join(&relative)
            .map(String::from)
            .map_err(|source| SitemapError::UnresolvableUrl {
                url: url.to_string(),
                source,
            })
    }

    /// The base as an absolute URL string, without a trailing slash on the path.
    pub fn as_str(&self) -> String {
        format!("{}{}", self.origin.as_str().trim_end_matches('/'), self.prefix)
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
