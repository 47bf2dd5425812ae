//! Rule source integration harness.
//!
//! # What this covers
//!
//! - **HTTP source** against a fake rules API: the served rules arrive in
//!   order, non-success statuses surface as `Status`, and bodies that are
//!   not a rule array surface as `Malformed`.
//! - **File source** over a temp file in the same wire format.
//! - **Source dispatch**: the `Source` enum behaves like the adapter it wraps.
//!
//! # What this does NOT cover
//!
//! - HTTPS endpoints (rejected as `InvalidUrl`, see the unit tests)
//!
//! # Running
//!
//! ```sh
//! cargo test --test source_harness
//! ```

mod common;
use common::fake_rules_api::FakeRulesApi;
use common::*;

use armview_core::DataUnavailable;
use armview_source::{FileSource, HttpSource, RuleSource, Source};
use axum::http::StatusCode;
use std::io::Write;

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_source_returns_served_rules() {
    let api = FakeRulesApi::start().await.unwrap();
    api.serve(StatusCode::OK, MIXED_JSON).await;

    let set = HttpSource::new(api.rules_url()).fetch().await.unwrap();

    assert_eq!(set.len(), 6);
    assert_eq!(set.rules()[0].antecedent, "Heavy Rain");
    assert_eq!(set.rules()[5].consequent, "Sore Throat");
    assert_eq!(api.hits().await, 1);
}

#[tokio::test]
async fn http_source_reports_status() {
    let api = FakeRulesApi::start().await.unwrap();
    api.serve(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

    let err = HttpSource::new(api.rules_url()).fetch().await.unwrap_err();
    assert!(matches!(err, DataUnavailable::Status(500)), "{err:?}");
}

#[tokio::test]
async fn http_source_rejects_non_array_body() {
    let api = FakeRulesApi::start().await.unwrap();
    api.serve(StatusCode::OK, MALFORMED_JSON).await;

    let err = HttpSource::new(api.rules_url()).fetch().await.unwrap_err();
    assert!(matches!(err, DataUnavailable::Malformed(_)), "{err:?}");
}

#[tokio::test]
async fn http_source_accepts_empty_array() {
    let api = FakeRulesApi::start().await.unwrap();

    let set = HttpSource::new(api.rules_url()).fetch().await.unwrap();
    assert!(set.is_empty());
    assert!(set.antecedents().is_empty());
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_source_matches_http_source() {
    let api = FakeRulesApi::start().await.unwrap();
    api.serve(StatusCode::OK, SCENARIO_JSON).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENARIO_JSON.as_bytes()).unwrap();

    let from_http = Source::http(api.rules_url()).fetch().await.unwrap();
    let from_file = Source::file(file.path()).fetch().await.unwrap();
    assert_eq!(from_http, from_file);
}

#[tokio::test]
async fn file_source_describes_its_path() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let source = FileSource::new(file.path());
    assert!(source.describe().contains(&file.path().display().to_string()));
}
