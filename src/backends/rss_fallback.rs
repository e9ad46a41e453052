//! Direct Google News RSS pull.
//!
//! This is the dependable low-level source behind the keyless backend. It
//! builds a locale-parameterized search-feed URL, parses whatever comes back
//! and maps entries straight to [`Article`]s. A feed that cannot be read
//! degrades to an empty list; only transport errors escape.
//!
//! There is no throttling here. Callers pace repeated pulls themselves (see
//! the post-fetch delay on the keyless adapter).

use crate::error::Result;
use crate::feed::{FeedEntry, parse_feed};
use crate::models::{Article, stamp_now};
use reqwest::Client;
use tracing::{info, instrument, warn};
use url::Url;

pub const GOOGLE_NEWS_SEARCH: &str = "https://news.google.com/rss/search";

/// Parameters shared by every Google News search-feed request.
#[derive(Debug, Clone)]
pub struct FeedQuery<'a> {
    pub query: &'a str,
    pub language: &'a str,
    pub country: &'a str,
    pub max_results: usize,
}

/// Compose `?q=..&hl=<lang>-<country>&gl=<country>&ceid=<country>:<lang>`.
pub fn search_url(base: &Url, query: &str, language: &str, country: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("q", query)
        .append_pair("hl", &format!("{language}-{country}"))
        .append_pair("gl", country)
        .append_pair("ceid", &format!("{country}:{language}"));
    url
}

/// Map parsed entries to canonical articles, all stamped with `fetched_at`.
pub fn map_entries(entries: Vec<FeedEntry>, fetched_at: &str) -> Vec<Article> {
    entries
        .into_iter()
        .map(|e| Article {
            source: Some(e.source.and_then(|s| s.title).unwrap_or_default()),
            title: e.title,
            description: e.summary.unwrap_or_default(),
            url: e.link,
            image: None,
            published_at: e.published,
            fetched_at: fetched_at.to_string(),
        })
        .collect()
}

/// A feed source the keyless adapter can fall back to.
pub trait FallbackFeed {
    /// Return at most `query.max_results` canonical articles in feed order.
    async fn fetch(&self, query: &FeedQuery<'_>) -> Result<Vec<Article>>;
}

/// Google News search feed over HTTP.
#[derive(Debug, Clone)]
pub struct GoogleNewsRss {
    client: Client,
    base: Url,
}

impl GoogleNewsRss {
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

impl FallbackFeed for GoogleNewsRss {
    #[instrument(
        level = "info",
        skip_all,
        fields(query = %query.query, language = %query.language, country = %query.country)
    )]
    async fn fetch(&self, query: &FeedQuery<'_>) -> Result<Vec<Article>> {
        let url = search_url(&self.base, query.query, query.language, query.country);
        let resp = self.client.get(url.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, %url, "Feed request was not successful; returning no articles");
            return Ok(Vec::new());
        }

        let body = resp.text().await?;
        let entries = match parse_feed(&body, query.max_results) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, %url, "Feed could not be parsed; returning no articles");
                return Ok(Vec::new());
            }
        };

        let articles = map_entries(entries, &stamp_now());
        info!(count = articles.len(), "Fetched feed articles");
        Ok(articles)
    }
}
