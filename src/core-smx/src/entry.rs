//! The URL entries that make up a sitemap.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::errors::{Result, SitemapError};

/// A single location to list in a sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlEntry {
    /// A bare path or absolute URL with no annotations.
    Path(String),
    /// A location annotated with optional metadata.
    Record(UrlRecord),
}

impl UrlEntry {
    /// The entry's location, before resolution against the base.
    pub fn url(&self) -> &str {
        match self {
            UrlEntry::Path(url) => url,
            UrlEntry::Record(record) => &record.url,
        }
    }
}

impl From<&str> for UrlEntry {
    fn from(url: &str) -> Self {
        UrlEntry::Path(url.to_string())
    }
}

impl From<String> for UrlEntry {
    fn from(url: String) -> Self {
        UrlEntry::Path(url)
    }
}

impl From<UrlRecord> for UrlEntry {
    fn from(record: UrlRecord) -> Self {
        UrlEntry::Record(record)
    }
}

/// Last-modification value of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastMod {
    /// Render the date of the build.
    Today,
    /// Rendered exactly as given.
    Verbatim(String),
    /// Rendered as `YYYY-MM-DD`.
    Date(NaiveDate),
}

impl LastMod {
    /// Renders the `<lastmod>` text, using `today` for [`LastMod::Today`].
    pub fn render(&self, today: NaiveDate) -> String {
        match self {
            LastMod::Today => format_date(today),
            LastMod::Verbatim(text) => text.clone(),
            LastMod::Date(date) => format_date(*date),
        }
    }
}

impl From<NaiveDate> for LastMod {
    fn from(date: NaiveDate) -> Self {
        LastMod::Date(date)
    }
}

impl From<DateTime<Utc>> for LastMod {
    fn from(moment: DateTime<Utc>) -> Self {
        LastMod::Date(moment.date_naive())
    }
}

/// Formats a date the way sitemaps expect it (`YYYY-MM-DD`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A location with its optional sitemap annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// Path or absolute URL of the page
    pub url: String,
    /// Optional last modification value
    pub last_mod: Option<LastMod>,
    /// Optional change frequency, emitted verbatim
    pub change_freq: Option<String>,
    /// Image locations, in order
    pub images: Vec<String>,
}

impl UrlRecord {
    /// Creates a record with no annotations.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            last_mod: None,
            change_freq: None,
            images: Vec::new(),
        }
    }

    /// Sets the last modification value.
    pub fn last_mod(mut self, last_mod: impl Into<LastMod>) -> Self {
        self.last_mod = Some(last_mod.into());
        self
    }

    /// Sets the change frequency.
    pub fn change_freq(mut self, change_freq: impl Into<String>) -> Self {
        self.change_freq = Some(change_freq.into());
        self
    }

    /// Adds an image location.
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }
}

/// Converts dynamic data (e.g. a JSON document) into URL entries.
///
/// The value must be an array. Each element is either a string or an object
/// with a string `url` and the optional `lastMod`, `changeFreq` and `image`
/// properties. Optional properties of any other type are ignored, but a
/// non-string inside an `image` array is an error. The first malformed
/// element fails the whole conversion.
pub fn parse_entries(value: Value) -> Result<Vec<UrlEntry>> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_entry(index, item))
            .collect(),
        other => Err(SitemapError::NotASequence(json_kind(&other).to_string())),
    }
}

fn parse_entry(index: usize, item: &Value) -> Result<UrlEntry> {
    let invalid = |reason: &str| SitemapError::InvalidEntry {
        index,
        reason: reason.to_string(),
        entry: item.to_string(),
    };

    let object = match item {
        Value::String(url) => return Ok(UrlEntry::Path(url.clone())),
        Value::Object(object) => object,
        _ => return Err(invalid("expected a string or an object")),
    };

    let url = match object.get("url") {
        Some(Value::String(url)) => url.clone(),
        _ => return Err(invalid("missing 'url' property")),
    };

    let last_mod = match object.get("lastMod") {
        Some(Value::Bool(true)) => Some(LastMod::Today),
        Some(Value::String(text)) => Some(LastMod::Verbatim(text.clone())),
        _ => None,
    };

    let change_freq = match object.get("changeFreq") {
        Some(Value::String(text)) => Some(text.clone()),
        _ => None,
    };

    let images = match object.get("image") {
        Some(Value::String(image)) => vec![image.clone()],
        Some(Value::Array(images)) => images
            .iter()
            .map(|image| image.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| invalid("'image' entries must be strings"))?,
        _ => Vec::new(),
    };

    Ok(UrlEntry::Record(UrlRecord {
        url,
        last_mod,
        change_freq,
        images,
    }))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
