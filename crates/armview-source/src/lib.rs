//! armview-source: rule data source adapters for armview.
//!
//! Each adapter fetches the complete rule payload exactly once and hands it
//! to [`RuleSet::from_json`](armview_core::RuleSet::from_json). There is no
//! retry, timeout or cancellation; a failed fetch is reported as
//! [`DataUnavailable`] and the session stays empty.

pub mod file;
pub mod http;

use armview_core::{DataUnavailable, RuleSet};
use std::future::Future;
use std::path::PathBuf;

pub use file::FileSource;
pub use http::HttpSource;

/// Trait implemented by each rule source.
pub trait RuleSource: Send + Sync {
    /// Fetch and decode the full rule set.
    fn fetch(&self) -> impl Future<Output = Result<RuleSet, DataUnavailable>> + Send;

    /// Short human-readable origin, shown while loading.
    fn describe(&self) -> String;
}

/// The source selected at startup.
#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpSource),
    File(FileSource),
}

impl Source {
    pub fn http(url: impl Into<String>) -> Self {
        Source::Http(HttpSource::new(url))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(FileSource::new(path))
    }
}

impl RuleSource for Source {
    async fn fetch(&self) -> Result<RuleSet, DataUnavailable> {
        match self {
            Source::Http(s) => s.fetch().await,
            Source::File(s) => s.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Source::Http(s) => s.describe(),
            Source::File(s) => s.describe(),
        }
    }
}
