//! Data models for fetched news articles.
//!
//! This module defines the two shapes an article takes on its way through the
//! pipeline:
//! - [`RawRecord`]: a loosely-keyed JSON object as handed over by an upstream
//!   producer (the aggregation client, or a feed entry already mapped once)
//! - [`Article`]: the canonical record every backend is normalized into
//!
//! Every [`Article`] serializes to the same seven keys, in the same order,
//! whichever backend produced it. Optional values are written as `null`
//! rather than omitted.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A loosely-shaped upstream record. Key names vary by producer.
pub type RawRecord = Map<String, Value>;

/// The canonical article record.
///
/// # Fields
///
/// * `source` - Publisher name, if the backend knows it
/// * `title` - Headline, always present
/// * `description` - Summary or snippet, empty when the backend has none
/// * `url` - Canonical article link, always present
/// * `image` - Thumbnail URL
/// * `published_at` - Upstream timestamp, verbatim (format varies by backend)
/// * `fetched_at` - RFC 3339 UTC instant at which the record was first stamped
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    pub source: Option<String>,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
    pub published_at: Option<String>,
    pub fetched_at: String,
}

impl Article {
    /// Convert back into a [`RawRecord`] so it can flow through normalization
    /// alongside records from other producers.
    pub fn into_raw(self) -> RawRecord {
        let mut raw = Map::new();
        raw.insert("source".into(), opt_string(self.source));
        raw.insert("title".into(), Value::String(self.title));
        raw.insert("description".into(), Value::String(self.description));
        raw.insert("url".into(), Value::String(self.url));
        raw.insert("image".into(), opt_string(self.image));
        raw.insert("published_at".into(), opt_string(self.published_at));
        raw.insert("fetched_at".into(), Value::String(self.fetched_at));
        raw
    }
}

fn opt_string(v: Option<String>) -> Value {
    v.map(Value::String).unwrap_or(Value::Null)
}

/// Format an instant the way `fetched_at` is written everywhere.
///
/// ```ignore
/// assert_eq!(stamp(t), "2025-05-06T14:30:00.000000+00:00");
/// ```
pub fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Current UTC time, formatted with [`stamp`].
pub fn stamp_now() -> String {
    stamp(Utc::now())
}
