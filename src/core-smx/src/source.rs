//! Producers of the URL entries that sitemaps are built from.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::entry::{UrlEntry, parse_entries};
use crate::errors::Result;

/// Interface to whatever knows the site's URLs: a database, a CMS, a file.
#[async_trait]
pub trait UrlSource: Send + Sync {
    async fn urls(&self) -> Result<Vec<UrlEntry>>;
}

/// Adapts an async closure into a [`UrlSource`].
pub struct FnSource<F> {
    produce: F,
}

impl<F, Fut> FnSource<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<UrlEntry>>> + Send + 'static,
{
    pub fn new(produce: F) -> Self {
        Self { produce }
    }
}

#[async_trait]
impl<F, Fut> UrlSource for FnSource<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<UrlEntry>>> + Send + 'static,
{
    async fn urls(&self) -> Result<Vec<UrlEntry>> {
        (self.produce)().await
    }
}

/// A fixed list of entries.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    entries: Vec<UrlEntry>,
}

impl StaticSource {
    pub fn new(entries: Vec<UrlEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl UrlSource for StaticSource {
    async fn urls(&self) -> Result<Vec<UrlEntry>> {
        Ok(self.entries.clone())
    }
}

/// Reads a JSON array of entries from disk on every refresh, so edits to the
/// file show up once the cached sitemaps expire.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UrlSource for JsonFileSource {
    async fn urls(&self) -> Result<Vec<UrlEntry>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        parse_entries(value)
    }
}
