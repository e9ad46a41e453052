//! Raw record → canonical [`Article`] conversion.
//!
//! Upstream producers disagree on key names (`source` vs `publisher`,
//! `published_at` vs `published date` vs `published`). Each canonical field
//! is resolved through an ordered table of candidate keys; the first candidate
//! holding a non-null value wins. Supporting a new synonym is a one-line edit
//! to the relevant table.

use crate::error::{FetchError, Result};
use crate::models::{Article, RawRecord};
use serde_json::Value;

/// Candidate keys for the publisher name.
pub const SOURCE_KEYS: &[&str] = &["source", "publisher"];
/// Candidate keys for the upstream publication timestamp.
pub const PUBLISHED_KEYS: &[&str] = &["published_at", "published date", "published"];
pub const DESCRIPTION_KEYS: &[&str] = &["description"];
pub const IMAGE_KEYS: &[&str] = &["image"];
pub const FETCHED_KEYS: &[&str] = &["fetched_at"];
pub const TITLE_KEYS: &[&str] = &["title"];
pub const URL_KEYS: &[&str] = &["url"];

/// Fields of a nested publisher object that may carry its display name.
const NAME_FIELDS: &[&str] = &["title", "name"];

/// Render a JSON value as text. Objects are searched for a name-like field,
/// so `{"href": .., "title": "Reuters"}` resolves to `"Reuters"`.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(obj) => NAME_FIELDS
            .iter()
            .find_map(|k| obj.get(*k).and_then(as_text)),
        Value::Array(_) => None,
    }
}

/// Return the first non-null value among `keys`, in order.
pub fn first_present(raw: &RawRecord, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| raw.get(*k).and_then(as_text))
}

fn required(
    raw: &RawRecord,
    keys: &[&str],
    field: &'static str,
    backend: &'static str,
) -> Result<String> {
    first_present(raw, keys).ok_or(FetchError::MissingField { field, backend })
}

/// Normalize one raw record.
///
/// `fetched_at` already present on the record is kept; otherwise `now` is used.
pub fn normalize_record(raw: &RawRecord, now: &str, backend: &'static str) -> Result<Article> {
    Ok(Article {
        source: first_present(raw, SOURCE_KEYS),
        title: required(raw, TITLE_KEYS, "title", backend)?,
        description: first_present(raw, DESCRIPTION_KEYS).unwrap_or_default(),
        url: required(raw, URL_KEYS, "url", backend)?,
        image: first_present(raw, IMAGE_KEYS),
        published_at: first_present(raw, PUBLISHED_KEYS),
        fetched_at: first_present(raw, FETCHED_KEYS).unwrap_or_else(|| now.to_string()),
    })
}

/// Normalize a batch, stamping every unstamped record with the same `now`.
pub fn normalize_all(raw: &[RawRecord], now: &str, backend: &'static str) -> Result<Vec<Article>> {
    raw.iter().map(|r| normalize_record(r, now, backend)).collect()
}
