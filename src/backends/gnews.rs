//! Google News aggregation client.
//!
//! A convenience layer over the Google News search feed that understands a
//! look-back period and hands back loosely-shaped records, keyed the way
//! aggregation libraries usually key them:
//!
//! | key | value |
//! |-----|-------|
//! | `title` | headline |
//! | `description` | feed summary, possibly empty |
//! | `published date` | upstream publication timestamp |
//! | `url` | article link |
//! | `publisher` | `{"href": .., "title": ..}` or `null` |
//!
//! Unlike [`GoogleNewsRss`](super::rss_fallback::GoogleNewsRss), every
//! problem here is an error; the keyless adapter decides what to do with it.

use super::rss_fallback::search_url;
use crate::error::{FetchError, Result};
use crate::feed::{FeedEntry, parse_feed};
use crate::models::RawRecord;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use url::Url;

pub use super::rss_fallback::GOOGLE_NEWS_SEARCH;

/// Search configuration for one aggregation call.
#[derive(Debug, Clone)]
pub struct GNewsConfig<'a> {
    pub language: &'a str,
    pub country: &'a str,
    /// Look-back window such as `1d`, `7d`, `1y`. Empty disables it.
    pub period: &'a str,
    pub max_results: usize,
}

/// The primary, best-effort news source of the keyless backend.
pub trait NewsAggregator {
    async fn get_news(&self, query: &str, config: &GNewsConfig<'_>) -> Result<Vec<RawRecord>>;
}

/// Scope a query to the look-back window, e.g. `World when:7d`.
pub fn scoped_query(query: &str, period: &str) -> String {
    let period = period.trim();
    if period.is_empty() {
        query.to_string()
    } else {
        format!("{query} when:{period}")
    }
}

fn entry_to_record(entry: FeedEntry) -> RawRecord {
    let publisher = match entry.source {
        Some(source) => {
            let mut obj = Map::new();
            obj.insert("href".into(), source.href.map(Value::String).unwrap_or(Value::Null));
            obj.insert("title".into(), source.title.map(Value::String).unwrap_or(Value::Null));
            Value::Object(obj)
        }
        None => Value::Null,
    };

    let mut raw = Map::new();
    raw.insert("title".into(), Value::String(entry.title));
    raw.insert("description".into(), Value::String(entry.summary.unwrap_or_default()));
    raw.insert(
        "published date".into(),
        entry.published.map(Value::String).unwrap_or(Value::Null),
    );
    raw.insert("url".into(), Value::String(entry.link));
    raw.insert("publisher".into(), publisher);
    raw
}

/// Aggregation client backed by the Google News search feed.
#[derive(Debug, Clone)]
pub struct GNewsClient {
    client: Client,
    base: Url,
}

impl GNewsClient {
    pub fn new(client: Client) -> Self {
        Self::with_base(
            client,
            Url::parse(GOOGLE_NEWS_SEARCH).expect("static endpoint URL is valid"),
        )
    }

    pub fn with_base(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

impl NewsAggregator for GNewsClient {
    #[instrument(level = "info", skip_all, fields(%query, period = %config.period))]
    async fn get_news(&self, query: &str, config: &GNewsConfig<'_>) -> Result<Vec<RawRecord>> {
        let url = search_url(
            &self.base,
            &scoped_query(query, config.period),
            config.language,
            config.country,
        );
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(FetchError::Upstream {
                status,
                message: "Google News search feed refused the request".to_string(),
            });
        }

        let records: Vec<RawRecord> = parse_feed(&body, config.max_results)?
            .into_iter()
            .map(entry_to_record)
            .collect();
        debug!(count = records.len(), "Aggregation client returned records");
        Ok(records)
    }
}
