//! News backends and the adapters that turn their output into [`Article`]s.
//!
//! # Supported Backends
//!
//! | Backend | Module | Credential | Notes |
//! |---------|--------|------------|-------|
//! | NewsAPI | [`newsapi`] | `NEWSAPI_KEY` | `/v2/everything`, newest first |
//! | Google News (aggregated) | [`gnews`] | none | Look-back period aware, loosely keyed records |
//! | Google News (raw feed) | [`rss_fallback`] | none | Dependable fallback for the above |
//!
//! [`keyless`] chains the two Google News sources together.
//!
//! [`Article`]: crate::models::Article

pub mod gnews;
pub mod keyless;
pub mod newsapi;
pub mod rss_fallback;
