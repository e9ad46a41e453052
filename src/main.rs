//! # headline_fetch
//!
//! Fetch recent news articles from NewsAPI or Google News and print them as a
//! JSON array of normalized records.
//!
//! ## Usage
//!
//! ```sh
//! headline_fetch -q "World" -l en -c US -n 10 --pretty
//! headline_fetch -e newsapi -o ~/news.json
//! ```
//!
//! ## Pipeline
//!
//! 1. **Selection**: pick the keyed (NewsAPI) or keyless (Google News) backend
//! 2. **Fetching**: one request, plus one fallback feed pull on the keyless path
//! 3. **Normalization**: reconcile upstream field names into one schema
//! 4. **Output**: JSON to stdout or a file

use clap::Parser;
use headline_fetch::dispatch::fetch_news;
use headline_fetch::logging::init_tracing;
use headline_fetch::outputs::json::{Destination, write_articles};
use std::error::Error;
use tracing::{debug, error, info};

mod cli;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(engine = %args.engine, query = %args.query, max = args.max, "Parsed CLI arguments");

    let params = args.fetch_params();
    let articles = match fetch_news(args.engine, &params).await {
        Ok(articles) => articles,
        Err(e) => {
            error!(engine = %args.engine, error = %e, "Fetch failed");
            return Err(e.into());
        }
    };

    let destination = Destination::from_arg(args.output.as_deref());
    write_articles(&articles, args.pretty, &destination).await?;

    let elapsed = start_time.elapsed();
    info!(
        count = articles.len(),
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );
    Ok(())
}
