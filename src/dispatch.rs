//! Backend selection.
//!
//! [`fetch_news`] picks the keyed or keyless adapter and forwards the subset
//! of [`FetchParams`] it needs. Both adapters already return canonical
//! articles, so the result is passed through untouched.

use crate::backends::gnews::{GNewsClient, GOOGLE_NEWS_SEARCH};
use crate::backends::keyless::{KeylessRequest, fetch_keyless};
use crate::backends::newsapi::{NEWSAPI_ENDPOINT, NewsApiClient, NewsApiRequest};
use crate::backends::rss_fallback::GoogleNewsRss;
use crate::client::{HttpConfig, build_client};
use crate::error::Result;
use crate::models::Article;
use std::fmt;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Which backend to fetch from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Google News, no key needed; falls back to the raw feed.
    #[default]
    #[value(name = "gnews")]
    GNews,
    /// NewsAPI.org, requires an API key.
    #[value(name = "newsapi")]
    NewsApi,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::GNews => "gnews",
            Backend::NewsApi => "newsapi",
        })
    }
}

/// Upstream endpoints. Overridable so tests can point at a local server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub newsapi: Url,
    pub google_news: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            newsapi: Url::parse(NEWSAPI_ENDPOINT).expect("static endpoint URL is valid"),
            google_news: Url::parse(GOOGLE_NEWS_SEARCH).expect("static endpoint URL is valid"),
        }
    }
}

/// Everything either backend might need.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub query: String,
    pub language: String,
    pub country: String,
    /// Look-back window (keyless only).
    pub period: String,
    /// Result cap; page size for NewsAPI.
    pub max_results: usize,
    /// NewsAPI key override (keyed only).
    pub api_key: Option<String>,
    /// Skip straight to the feed (keyless only).
    pub force_fallback: bool,
    /// Post-fetch pause (keyless only).
    pub sleep: Option<Duration>,
    pub http: HttpConfig,
    pub endpoints: Endpoints,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            query: "World".to_string(),
            language: "en".to_string(),
            country: "US".to_string(),
            period: "7d".to_string(),
            max_results: 20,
            api_key: None,
            force_fallback: false,
            sleep: None,
            http: HttpConfig::default(),
            endpoints: Endpoints::default(),
        }
    }
}

/// Fetch from the selected backend.
#[instrument(level = "info", skip_all, fields(%backend, query = %params.query))]
pub async fn fetch_news(backend: Backend, params: &FetchParams) -> Result<Vec<Article>> {
    let client = build_client(&params.http)?;

    let articles = match backend {
        Backend::GNews => {
            let aggregator =
                GNewsClient::with_base(client.clone(), params.endpoints.google_news.clone());
            let fallback = GoogleNewsRss::with_base(client, params.endpoints.google_news.clone());
            let req = KeylessRequest {
                query: &params.query,
                language: &params.language,
                country: &params.country,
                period: &params.period,
                max_results: params.max_results,
                force_fallback: params.force_fallback,
                sleep: params.sleep,
            };
            fetch_keyless(&aggregator, &fallback, &req).await?
        }
        Backend::NewsApi => {
            let newsapi = NewsApiClient::with_endpoint(client, params.endpoints.newsapi.clone());
            let req = NewsApiRequest {
                api_key: params.api_key.as_deref(),
                query: &params.query,
                language: &params.language,
                page_size: u32::try_from(params.max_results).unwrap_or(u32::MAX),
            };
            newsapi.fetch(&req).await?
        }
    };

    info!(count = articles.len(), "Fetch complete");
    Ok(articles)
}
