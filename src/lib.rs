//! # headline_fetch
//!
//! Fetches recent news articles from one of several interchangeable backends
//! and normalizes their heterogeneous schemas into one canonical
//! [`Article`](models::Article) record.
//!
//! ## Backends
//!
//! - **NewsAPI** (keyed): a search-style REST API. Failures are terminal.
//! - **Google News** (keyless): an aggregation client first, then a direct
//!   RSS pull whenever the client fails, comes back empty, or the caller
//!   forces the fallback.
//!
//! ## Architecture
//!
//! ```text
//! dispatch::fetch_news
//!   ├── backends::newsapi            (keyed)
//!   └── backends::keyless            (keyless)
//!         ├── backends::gnews        (primary)
//!         └── backends::rss_fallback (fallback)
//!               └── feed             (RSS / Atom parsing)
//! ```
//!
//! All I/O is sequential: at most a primary request and one fallback request
//! per fetch, never concurrent.

pub mod backends;
pub mod broadcast;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod feed;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod outputs;
pub mod utils;

#[cfg(test)]
mod test_utils;
