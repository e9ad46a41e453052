//! Command-line interface definitions for headline_fetch.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The NewsAPI key may also come from the `NEWSAPI_KEY` environment variable.

use clap::Parser;
use headline_fetch::client::HttpConfig;
use headline_fetch::dispatch::{Backend, Endpoints, FetchParams};
use std::time::Duration;

/// Fetch news articles and output JSON (stdout or file).
///
/// # Examples
///
/// ```sh
/// # Google News, falling back to the raw feed when needed
/// headline_fetch -q "climate summit" -n 10 --pretty
///
/// # NewsAPI, written to a file
/// headline_fetch -e newsapi --newsapi-key YOUR_KEY -o ~/news.json
///
/// # Skip straight to the feed and pause 2 s afterwards
/// headline_fetch --force --sleep 2
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Backend to use
    #[arg(short, long, value_enum, default_value_t = Backend::GNews)]
    pub engine: Backend,

    /// Search phrase
    #[arg(short, long, default_value = "World")]
    pub query: String,

    /// ISO 639-1 language
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// ISO 3166-1 country
    #[arg(short, long, default_value = "US")]
    pub country: String,

    /// Look-back window for gnews (e.g. 1d, 30d, 1y)
    #[arg(long, default_value = "7d")]
    pub period: String,

    /// Max articles (gnews: reliable ≤10, NewsAPI: ≤100)
    #[arg(short = 'n', long = "max", default_value_t = 20)]
    pub max: usize,

    /// Write JSON to file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,

    /// NewsAPI key (NewsAPI engine only)
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub newsapi_key: Option<String>,

    /// Force RSS fallback even if gnews returns results
    #[arg(long)]
    pub force: bool,

    /// Seconds to sleep after fetch (rate-limit helper)
    #[arg(long, default_value = "0", value_parser = parse_seconds)]
    pub sleep: Duration,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_parser = parse_seconds)]
    pub timeout: Duration,
}

/// Parse a non-negative number of seconds, fractions allowed.
fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("`{s}` must be a non-negative number of seconds"))
}

impl Cli {
    pub fn fetch_params(&self) -> FetchParams {
        FetchParams {
            query: self.query.clone(),
            language: self.language.clone(),
            country: self.country.clone(),
            period: self.period.clone(),
            max_results: self.max,
            api_key: self.newsapi_key.clone(),
            force_fallback: self.force,
            sleep: Some(self.sleep).filter(|d| !d.is_zero()),
            http: HttpConfig::with_timeout(self.timeout),
            endpoints: Endpoints::default(),
        }
    }
}
