//! The sitemap service: a URL source, a builder, and the refresh cache around them.

use std::sync::Arc;

use crate::cache::RefreshCache;
use crate::clock::{Clock, SystemClock};
use crate::config::SitemapOptions;
use crate::documents::{DocumentSet, SitemapBuilder};
use crate::entry::UrlEntry;
use crate::errors::{Result, SitemapError};
use crate::source::{FnSource, UrlSource};

/// Serves sitemap documents built from a [`UrlSource`], rebuilding them at
/// most once per `max_age`.
#[derive(Debug)]
pub struct SitemapService {
    cache: RefreshCache<DocumentSet>,
}

impl SitemapService {
    /// Creates the service. Fails immediately if `base` is not an absolute URL
    /// or the configured size is zero.
    pub fn new(source: Arc<dyn UrlSource>, base: &str, options: SitemapOptions) -> Result<Self> {
        Self::with_clock(source, base, options, Arc::new(SystemClock))
    }

    /// Creates the service from an async closure producing the entries.
    pub fn from_fn<F, Fut>(produce: F, base: &str, options: SitemapOptions) -> Result<Self>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<UrlEntry>>> + Send + 'static,
    {
        Self::new(Arc::new(FnSource::new(produce)), base, options)
    }

    /// Same as [`SitemapService::new`] with an explicit clock.
    pub fn with_clock(
        source: Arc<dyn UrlSource>,
        base: &str,
        options: SitemapOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        options.validate()?;
        let builder = SitemapBuilder::new(base, options.size)?.with_clock(Arc::clone(&clock));

        let cache = RefreshCache::new(options.max_age, clock, move || {
            let source = Arc::clone(&source);
            let builder = builder.clone();
            async move {
                let entries = source.urls().await?;
                let documents = builder.build(&entries)?;
                tracing::info!(
                    entries = entries.len(),
                    documents = documents.len(),
                    base = %builder.base(),
                    "Built sitemaps"
                );
                Ok::<_, SitemapError>(documents)
            }
        });

        Ok(Self { cache })
    }

    /// The current document set, rebuilding it if it is missing or expired.
    pub async fn documents(&self) -> Result<Arc<DocumentSet>> {
        self.cache.get().await
    }

    /// The document served at `path`, if the current set has one.
    pub async fn lookup(&self, path: &str) -> Result<Option<String>> {
        let documents = self.documents().await?;
        Ok(documents.get(path).map(str::to_string))
    }

    /// Forces the next request to rebuild the documents.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn clock() -> Arc<ManualClock> {
        let start = DateTime::parse_from_rfc3339("2018-07-15T08:00:00Z").unwrap().with_timezone(&Utc);
        Arc::new(ManualClock::new(start))
    }

    #[tokio::test]
    async fn test_lookup_serves_built_documents() {
        let service = SitemapService::from_fn(
            || async { Ok((0..5).map(|i| UrlEntry::Path(format!("/{}", i))).collect::<Vec<_>>()) },
            "https://example.com",
            SitemapOptions::builder().size(2).build(),
        )
        .unwrap();

        let index = service.lookup("/sitemap.xml").await.unwrap().unwrap();
        assert!(index.contains("<sitemapindex"));
        assert!(service.lookup("/sitemap-2.xml").await.unwrap().is_some());
        assert!(service.lookup("/sitemap-3.xml").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_source_called_once_per_max_age() {
        let calls = Arc::new(AtomicUsize::new(0));
        let clock = clock();
        let source = {
            let calls = Arc::clone(&calls);
            FnSource::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(vec![UrlEntry::from("/")]) }
            })
        };
        let service = SitemapService::with_clock(
            Arc::new(source),
            "https://example.com",
            SitemapOptions::builder().max_age(Duration::from_secs(3600)).build(),
            Arc::clone(&clock) as Arc<dyn Clock>,
        )
        .unwrap();

        service.documents().await.unwrap();
        service.documents().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        clock.advance(chrono::Duration::hours(1));
        service.documents().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_rebuilds_before_max_age() {
        let calls = Arc::new(AtomicUsize::new(0));
        let service = SitemapService::from_fn(
            {
                let calls = Arc::clone(&calls);
                move || {
                    let count = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    async move { Ok((0..count).map(|i| UrlEntry::Path(format!("/{}", i))).collect::<Vec<_>>()) }
                }
            },
            "https://example.com",
            SitemapOptions::default(),
        )
        .unwrap();

        let before = service.lookup("/sitemap.xml").await.unwrap().unwrap();
        assert_eq!(before.matches("<url>").count(), 1);

        service.invalidate().await;
        let after = service.lookup("/sitemap.xml").await.unwrap().unwrap();
        assert_eq!(after.matches("<url>").count(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_setup_fails_eagerly() {
        let source = || async { Ok::<Vec<UrlEntry>, SitemapError>(Vec::new()) };
        assert!(matches!(
            SitemapService::from_fn(source, "not a url", SitemapOptions::default()),
            Err(SitemapError::InvalidBase { .. })
        ));
        assert!(matches!(
            SitemapService::from_fn(source, "https://example.com", SitemapOptions::builder().size(0).build()),
            Err(SitemapError::InvalidSize(0))
        ));
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let service = SitemapService::from_fn(
            || async { Err(SitemapError::Source("cms offline".to_string())) },
            "https://example.com",
            SitemapOptions::default(),
        )
        .unwrap();

        let error = service.lookup("/sitemap.xml").await.unwrap_err();
        assert_eq!(error.to_string(), "URL source failed: cms offline");
    }
}
