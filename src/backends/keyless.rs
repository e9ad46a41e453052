//! Keyless backend: aggregation client with a raw-feed fallback.
//!
//! # Decision procedure
//!
//! 1. Unless `force_fallback` is set, ask the [`NewsAggregator`]. Its result
//!    is folded into a [`PrimaryOutcome`]; failures are logged, never raised.
//! 2. If the fallback was forced, or the outcome is [`PrimaryOutcome::Empty`]
//!    or [`PrimaryOutcome::Failed`], pull the [`FallbackFeed`] with the same
//!    query, locale and cap instead.
//! 3. Normalize whatever records are held (see [`crate::normalize`]).
//!    Timestamps stamped earlier in the chain survive.
//! 4. Sleep for the requested post-fetch delay, if any.
//!
//! Transport errors from the fallback feed itself are the only errors that
//! leave this module.

use super::gnews::{GNewsConfig, NewsAggregator};
use super::rss_fallback::{FallbackFeed, FeedQuery};
use crate::error::{FetchError, Result};
use crate::models::{Article, RawRecord, stamp_now};
use crate::normalize::normalize_all;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// What the primary (aggregation) attempt produced.
#[derive(Debug)]
pub enum PrimaryOutcome {
    Articles(Vec<RawRecord>),
    Empty,
    Failed(FetchError),
}

impl PrimaryOutcome {
    pub fn from_result(result: Result<Vec<RawRecord>>) -> Self {
        match result {
            Ok(records) if records.is_empty() => Self::Empty,
            Ok(records) => Self::Articles(records),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Parameters for one keyless fetch.
#[derive(Debug, Clone)]
pub struct KeylessRequest<'a> {
    pub query: &'a str,
    pub language: &'a str,
    pub country: &'a str,
    pub period: &'a str,
    pub max_results: usize,
    /// Skip the aggregation client and go straight to the feed.
    pub force_fallback: bool,
    /// Blocking pause after normalization, for callers pacing repeated runs.
    pub sleep: Option<Duration>,
}

impl KeylessRequest<'_> {
    fn gnews_config(&self) -> GNewsConfig<'_> {
        GNewsConfig {
            language: self.language,
            country: self.country,
            period: self.period,
            max_results: self.max_results,
        }
    }

    fn feed_query(&self) -> FeedQuery<'_> {
        FeedQuery {
            query: self.query,
            language: self.language,
            country: self.country,
            max_results: self.max_results,
        }
    }
}

/// Run the fallback chain and return canonical articles.
#[instrument(
    level = "info",
    skip_all,
    fields(query = %req.query, force_fallback = req.force_fallback)
)]
pub async fn fetch_keyless<A, F>(
    aggregator: &A,
    fallback: &F,
    req: &KeylessRequest<'_>,
) -> Result<Vec<Article>>
where
    A: NewsAggregator,
    F: FallbackFeed,
{
    let primary = if req.force_fallback {
        None
    } else {
        Some(PrimaryOutcome::from_result(
            aggregator.get_news(req.query, &req.gnews_config()).await,
        ))
    };

    let (raw, backend) = match primary {
        Some(PrimaryOutcome::Articles(records)) => (records, "gnews"),
        Some(PrimaryOutcome::Failed(e)) => {
            warn!(error = %e, "gnews failed; switching to RSS fallback");
            (fallback_records(fallback, req).await?, "rss")
        }
        Some(PrimaryOutcome::Empty) => {
            info!("gnews returned nothing; switching to RSS fallback");
            (fallback_records(fallback, req).await?, "rss")
        }
        None => {
            info!("RSS fallback forced");
            (fallback_records(fallback, req).await?, "rss")
        }
    };

    let articles = normalize_all(&raw, &stamp_now(), backend)?;
    info!(count = articles.len(), backend, "Normalized keyless articles");

    if let Some(delay) = req.sleep.filter(|d| !d.is_zero()) {
        info!(?delay, "Sleeping after fetch");
        tokio::time::sleep(delay).await;
    }

    Ok(articles)
}

async fn fallback_records<F: FallbackFeed>(
    fallback: &F,
    req: &KeylessRequest<'_>,
) -> Result<Vec<RawRecord>> {
    Ok(fallback
        .fetch(&req.feed_query())
        .await?
        .into_iter()
        .map(Article::into_raw)
        .collect())
}
