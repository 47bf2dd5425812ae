//! armview-core: rule model and query engine for armview.
//!
//! # Architecture
//!
//! ```text
//! RuleSource ──► RuleSet ──► query ──► UI / headless
//!                   │
//!                   └──► vocabularies (selectors)
//! ```
//!
//! Everything here is pure and synchronous. The one fallible step is turning
//! a source payload into a [`RuleSet`]; queries over a loaded set never fail.

pub mod config;
pub mod error;
pub mod query;
pub mod ruleset;
pub mod selection;
pub mod types;

pub use error::DataUnavailable;
pub use query::{predict_by_weather, query_by_antecedent, query_by_consequent, search_rules};
pub use ruleset::RuleSet;
pub use selection::{toggle_expand, Selection};
pub use types::Rule;
