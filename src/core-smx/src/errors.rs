//! Error types for the sitemap library.

use thiserror::Error;

/// Main error type for sitemap building and serving operations.
///
/// Cloneable so that a single failed refresh can be handed to every caller
/// that was waiting on it.
#[derive(Debug, Clone, Error)]
pub enum SitemapError {
    /// Base origin is not an absolute, hierarchical URL
    #[error("Invalid base URL '{base}': {reason}")]
    InvalidBase { base: String, reason: String },

    /// Chunk capacity must be a positive integer
    #[error("Invalid sitemap size {0}: must be a positive integer")]
    InvalidSize(usize),

    /// Entry location could not be joined onto the base origin
    #[error("Cannot resolve '{url}' against base: {source}")]
    UnresolvableUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Entry is neither a string nor a record with a `url` property
    #[error("Invalid sitemap url object at index {index}, {reason}: {entry}")]
    InvalidEntry { index: usize, reason: String, entry: String },

    /// URL source produced something other than a sequence of entries
    #[error("URL source must resolve to an array of entries, got {0}")]
    NotASequence(String),

    /// URL source failed to produce entries
    #[error("URL source failed: {0}")]
    Source(String),

    /// XML writer failed
    #[error("Failed to render XML document: {0}")]
    Render(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SitemapError {
    fn from(err: std::io::Error) -> Self {
        SitemapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SitemapError {
    fn from(err: serde_json::Error) -> Self {
        SitemapError::Source(format!("invalid JSON: {}", err))
    }
}

/// Type alias for Result with SitemapError
pub type Result<T> = std::result::Result<T, SitemapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SitemapError::InvalidSize(0);
        assert_eq!(error.to_string(), "Invalid sitemap size 0: must be a positive integer");

        let error = SitemapError::InvalidEntry {
            index: 2,
            reason: "missing 'url' property".to_string(),
            entry: r#"{"lastMod":true}"#.to_string(),
        };
        assert_eq!(
            error.to_string(),
            r#"Invalid sitemap url object at index 2, missing 'url' property: {"lastMod":true}"#
        );
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "urls.json");
        let error: SitemapError = io.into();
        assert!(matches!(error, SitemapError::Io(_)));
    }
}
