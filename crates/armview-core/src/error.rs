//! Error taxonomy.
//!
//! The only failure boundary in armview is the startup load. Queries over a
//! loaded [`RuleSet`](crate::RuleSet) cannot fail, and a lookup with nothing
//! selected is simply an empty result.

use std::path::PathBuf;
use thiserror::Error;

/// The rule set could not be obtained. Shown to the user once; never retried.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("invalid rules URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("rules API unreachable: {0}")]
    Unreachable(String),

    #[error("rules API returned HTTP {0}")]
    Status(u16),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rule data: {0}")]
    Malformed(#[from] serde_json::Error),
}
