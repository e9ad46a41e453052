//! NewsAPI.org adapter (the keyed backend).
//!
//! Issues one request to the `/v2/everything` search endpoint, sorted by
//! publication time, and maps the returned article list to [`Article`]s.
//! There is no fallback for this backend: a missing key, a failed request or
//! an error status ends the call.

use crate::error::{FetchError, Result};
use crate::models::{Article, stamp_now};
use crate::utils::truncate_for_log;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use url::Url;

pub const NEWSAPI_KEY_ENV: &str = "NEWSAPI_KEY";
pub const NEWSAPI_ENDPOINT: &str = "https://newsapi.org/v2/everything";

const BACKEND: &str = "newsapi";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    source: Option<NewsApiSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

/// Body NewsAPI sends alongside error statuses.
#[derive(Debug, Deserialize)]
struct NewsApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Parameters for one keyed search.
#[derive(Debug, Clone)]
pub struct NewsApiRequest<'a> {
    /// Explicit key; `NEWSAPI_KEY` is consulted when absent or blank.
    pub api_key: Option<&'a str>,
    pub query: &'a str,
    pub language: &'a str,
    pub page_size: u32,
}

fn env_api_key() -> Option<String> {
    std::env::var(NEWSAPI_KEY_ENV).ok()
}

/// Resolve the API key from the explicit argument, then `lookup`.
fn resolve_api_key_with(
    explicit: Option<&str>,
    lookup: impl FnOnce() -> Option<String>,
) -> Result<String> {
    explicit
        .map(str::to_string)
        .filter(|k| !k.trim().is_empty())
        .or_else(|| lookup().filter(|k| !k.trim().is_empty()))
        .ok_or_else(|| {
            FetchError::Configuration(format!(
                "Set {NEWSAPI_KEY_ENV} env var or pass --newsapi-key"
            ))
        })
}

fn upstream_error(status: StatusCode, body: &str) -> FetchError {
    let message = match serde_json::from_str::<NewsApiErrorBody>(body) {
        Ok(NewsApiErrorBody {
            code,
            message: Some(message),
        }) => match code {
            Some(code) => format!("{code}: {message}"),
            None => message,
        },
        _ => truncate_for_log(body, 300),
    };
    FetchError::Upstream { status, message }
}

fn map_articles(articles: Vec<NewsApiArticle>, fetched_at: &str) -> Result<Vec<Article>> {
    articles
        .into_iter()
        .map(|a| {
            Ok(Article {
                source: a.source.and_then(|s| s.name),
                title: a.title.ok_or(FetchError::MissingField {
                    field: "title",
                    backend: BACKEND,
                })?,
                description: a.description.unwrap_or_default(),
                url: a.url.ok_or(FetchError::MissingField {
                    field: "url",
                    backend: BACKEND,
                })?,
                image: a.url_to_image,
                published_at: a.published_at,
                fetched_at: fetched_at.to_string(),
            })
        })
        .collect()
}

/// Client for the NewsAPI search endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    endpoint: Url,
    /// Consulted when the request carries no usable key.
    key_lookup: fn() -> Option<String>,
}

impl NewsApiClient {
    pub fn new(client: Client) -> Self {
        Self::with_endpoint(
            client,
            Url::parse(NEWSAPI_ENDPOINT).expect("static endpoint URL is valid"),
        )
    }

    pub fn with_endpoint(client: Client, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            key_lookup: env_api_key,
        }
    }

    /// Replace the `NEWSAPI_KEY` lookup used when no explicit key is given.
    pub fn with_key_lookup(mut self, key_lookup: fn() -> Option<String>) -> Self {
        self.key_lookup = key_lookup;
        self
    }

    /// Run one search and return canonical articles.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Configuration`] when no key is resolvable
    /// - [`FetchError::Network`] on transport failure
    /// - [`FetchError::Upstream`] on a non-success status
    /// - [`FetchError::Decode`] / [`FetchError::MissingField`] on a malformed body
    #[instrument(
        level = "info",
        skip_all,
        fields(query = %req.query, language = %req.language, page_size = req.page_size)
    )]
    pub async fn fetch(&self, req: &NewsApiRequest<'_>) -> Result<Vec<Article>> {
        let api_key = resolve_api_key_with(req.api_key, self.key_lookup)?;
        let page_size = req.page_size.to_string();

        let resp = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", req.query),
                ("language", req.language),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let err = upstream_error(status, &body);
            error!(%status, error = %err, "NewsAPI request failed");
            return Err(err);
        }

        let parsed: EverythingResponse = serde_json::from_str(&body).map_err(|e| {
            debug!(body = %truncate_for_log(&body, 300), "Undecodable NewsAPI body");
            FetchError::Decode(e.to_string())
        })?;

        let articles = map_articles(parsed.articles, &stamp_now())?;
        info!(count = articles.len(), "Fetched NewsAPI articles");
        Ok(articles)
    }
}
