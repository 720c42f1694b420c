//! Splits a URL list into sitemap documents keyed by the path they are served at.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::{Clock, SystemClock};
use crate::config::{MAX_SITEMAP_LENGTH, validate_size};
use crate::entry::UrlEntry;
use crate::errors::Result;
use crate::resolve::Base;
use crate::sitemap::{build_index, build_sitemap};

/// Path of the root document: the only sitemap, or the index over the chunks.
pub const ROOT_PATH: &str = "/sitemap.xml";

/// Served path of the `index`-th chunk.
pub fn chunk_path(index: usize) -> String {
    format!("/sitemap-{}.xml", index)
}

/// One rendered document and the path it is served at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapDocument {
    pub path: String,
    pub xml: String,
}

/// Every document produced by one build, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    documents: Vec<SitemapDocument>,
}

impl DocumentSet {
    /// Looks up the document served at `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.documents
            .iter()
            .find(|document| document.path == path)
            .map(|document| document.xml.as_str())
    }

    /// Served paths, in generation order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|document| document.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SitemapDocument> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// True when `/sitemap.xml` is an index over numbered chunks.
    pub fn is_paginated(&self) -> bool {
        self.documents.len() > 1
    }

    fn insert(&mut self, path: String, xml: String) {
        self.documents.push(SitemapDocument { path, xml });
    }
}

/// Builds the full document set for `entries`.
///
/// With at most `size` entries a single sitemap is served at `/sitemap.xml`.
/// Otherwise chunks of `size` entries are served at `/sitemap-0.xml`,
/// `/sitemap-1.xml`, ... and `/sitemap.xml` is an index over exactly those chunks.
pub fn build_documents(entries: &[UrlEntry], base: &Base, size: usize, today: NaiveDate) -> Result<DocumentSet> {
    let size = validate_size(size)?;
    let mut documents = DocumentSet::default();

    if entries.len() <= size {
        documents.insert(ROOT_PATH.to_string(), build_sitemap(entries, base, today)?);
        return Ok(documents);
    }

    for (index, chunk) in entries.chunks(size).enumerate() {
        documents.insert(chunk_path(index), build_sitemap(chunk, base, today)?);
    }

    let index = {
        let chunk_paths = documents.paths().collect::<Vec<_>>();
        build_index(&chunk_paths, base, today)?
    };
    documents.insert(ROOT_PATH.to_string(), index);

    Ok(documents)
}

/// Builds the document set for `entries` under `base`, stamped with today's date.
///
/// `size` defaults to 50,000 URLs per document. Usable on its own for static
/// pre-generation, without the caching and serving layers.
///
/// # Examples
///
/// ```
/// # use core_smx::{UrlEntry, build_sitemaps};
/// let urls: Vec<UrlEntry> = vec!["/1".into(), "/2".into(), "/3".into()];
/// let sitemaps = build_sitemaps(&urls, "https://example.com", None).unwrap();
/// assert_eq!(sitemaps.paths().collect::<Vec<_>>(), vec!["/sitemap.xml"]);
/// ```
pub fn build_sitemaps(entries: &[UrlEntry], base: &str, size: Option<usize>) -> Result<DocumentSet> {
    SitemapBuilder::new(base, size.unwrap_or(MAX_SITEMAP_LENGTH))?.build(entries)
}

/// A validated base and chunk capacity, ready to build document sets.
#[derive(Clone)]
pub struct SitemapBuilder {
    base: Base,
    size: usize,
    clock: Arc<dyn Clock>,
}

impl SitemapBuilder {
    /// Validates `base` and `size` up front so that bad configuration fails at setup.
    pub fn new(base: &str, size: usize) -> Result<Self> {
        Ok(Self {
            base: Base::parse(base)?,
            size: validate_size(size)?,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replaces the clock used to date entries.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base(&self) -> &Base {
        &self.base
    }

    pub fn build(&self, entries: &[UrlEntry]) -> Result<DocumentSet> {
        build_documents(entries, &self.base, self.size, self.clock.today())
    }
}

impl std::fmt::Debug for SitemapBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SitemapBuilder")
            .field("base", &self.base)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
