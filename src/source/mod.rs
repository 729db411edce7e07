//! Data source abstraction layer.
//!
//! This module defines the [`JsonSource`] trait used by grids to fetch
//! their JSON, the lenient [`Item`] view over one fetched entry, and the
//! concrete [`WebSource`] that speaks HTTP(S) and `file://`.
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `cached.rs`).
//! 2. Define a struct and implement [`JsonSource`] for it.
//! 3. Add `mod cached;` below and re-export your struct.
//! 4. Hand it to the [`Loader`](crate::loader::Loader) in `main.rs`.
//!
//! Grids never look at transport details: they only see the body text or a
//! [`LoadError`].

mod item;
mod web;

pub use item::Item;
pub use web::{HttpOptions, WebSource};

use async_trait::async_trait;
use url::Url;

use crate::error::LoadError;

/// Trait that every grid data source must implement.
///
/// Fetches run as tasks on the tokio runtime, so implementations must be
/// [`Send`] + [`Sync`].
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Fetch the body at `url`.
    ///
    /// Implementations report non-success responses as
    /// [`LoadError::Status`]; decoding the body is left to the caller.
    async fn fetch(&self, url: &Url) -> Result<String, LoadError>;
}

/// Resolve a grid `src` attribute against the page base URL.
///
/// Absolute URLs pass through; relative ones (`posts.json`,
/// `/data/projects.json`) are joined onto `base`.
pub fn resolve(src: &str, base: &Url) -> Result<Url, LoadError> {
    base.join(src).map_err(|source| LoadError::InvalidUrl {
        src: src.to_string(),
        source,
    })
}

/// Decode a fetched body into the raw item list.
///
/// Anything that is not a JSON array is rejected; the entries themselves
/// are kept as-is and read leniently through [`Item`].
pub fn parse_items(body: &str) -> Result<Vec<serde_json::Value>, LoadError> {
    match serde_json::from_str(body)? {
        serde_json::Value::Array(items) => Ok(items),
        _ => Err(LoadError::NotArray),
    }
}
