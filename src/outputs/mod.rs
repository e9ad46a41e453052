//! Output sinks for fetched articles.
//!
//! # Submodules
//!
//! - [`json`]: Writes the article list as JSON to stdout or a file
//!
//! Logging goes to stderr, so stdout carries nothing but the JSON document
//! (or, when writing to a file, a one-line confirmation).

pub mod json;
