//! JSON output for fetched articles.
//!
//! The document is a bare JSON array of [`Article`] objects. Pretty output is
//! indented by two spaces; non-ASCII text is written as-is, never escaped.

use crate::models::Article;
use crate::utils::expand_tilde;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::{self, AsyncWriteExt};
use tracing::{error, info, instrument};

/// Where the JSON document should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `None` means stdout; a path has a leading `~` expanded.
    pub fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) => Destination::File(expand_tilde(path)),
            None => Destination::Stdout,
        }
    }
}

/// Serialize articles, compact or pretty.
pub fn render(articles: &[Article], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(articles)
    } else {
        serde_json::to_string(articles)
    }
}

/// Write articles to `destination`.
///
/// Stdout gets the document plus a trailing newline. A file gets the document
/// alone, followed by a `Saved N article(s) → PATH` line on stdout.
#[instrument(level = "info", skip_all, fields(?destination, count = articles.len()))]
pub async fn write_articles(
    articles: &[Article],
    pretty: bool,
    destination: &Destination,
) -> Result<(), Box<dyn Error>> {
    let json = render(articles, pretty)?;

    match destination {
        Destination::Stdout => {
            let mut stdout = io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Destination::File(path) => {
            if let Err(e) = fs::write(path, json).await {
                error!(path = %path.display(), error = %e, "Failed to write JSON");
                return Err(e.into());
            }
            info!(path = %path.display(), "Wrote JSON file");
            println!("Saved {} article(s) → {}", articles.len(), path.display());
        }
    }

    Ok(())
}
