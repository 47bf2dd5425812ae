//! HTTP source: a single `GET` against the rules API.
//!
//! Uses the `hyper-util` legacy client over plain HTTP; the rules API is
//! served locally alongside the mining pipeline.

use crate::RuleSource;
use armview_core::{DataUnavailable, RuleSet};
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::Uri;
use hyper_util::{client::legacy::Client, rt::TokioExecutor};

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn uri(&self) -> Result<Uri, DataUnavailable> {
        let uri = self.url.parse::<Uri>().map_err(|e| {
            DataUnavailable::InvalidUrl {
                url: self.url.clone(),
                reason: e.to_string(),
            }
        })?;
        match uri.scheme_str() {
            Some("http") => Ok(uri),
            other => Err(DataUnavailable::InvalidUrl {
                url: self.url.clone(),
                reason: format!("unsupported scheme {:?}, expected http", other.unwrap_or("")),
            }),
        }
    }
}

impl RuleSource for HttpSource {
    async fn fetch(&self) -> Result<RuleSet, DataUnavailable> {
        let uri = self.uri()?;
        tracing::info!(url = %self.url, "fetching rules");

        let client: Client<_, Empty<Bytes>> = Client::builder(TokioExecutor::new()).build_http();

        let response = client
            .get(uri)
            .await
            .map_err(|e| DataUnavailable::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "rules API error status");
            return Err(DataUnavailable::Status(status.as_u16()));
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| DataUnavailable::Unreachable(e.to_string()))?
            .to_bytes();
        tracing::debug!(bytes = body.len(), "rules payload received");

        RuleSet::from_json(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_http() {
        let src = HttpSource::new("http://127.0.0.1:8000/api/rules");
        assert!(src.uri().is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = HttpSource::new("https://example.org/api/rules").uri().unwrap_err();
        assert!(matches!(err, DataUnavailable::InvalidUrl { .. }));
        let err = HttpSource::new("/api/rules").uri().unwrap_err();
        assert!(matches!(err, DataUnavailable::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_unparseable_url() {
        let err = HttpSource::new("http://exa mple").uri().unwrap_err();
        assert!(matches!(err, DataUnavailable::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        // Bind then drop to get a port nothing is listening on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = HttpSource::new(format!("http://127.0.0.1:{port}/api/rules"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, DataUnavailable::Unreachable(_)));
    }
}
