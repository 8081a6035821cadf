//! Sequential liveness checks for catalog URLs.

use std::error::Error as _;

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::ResourceCatalog;
use crate::http::HttpClient;
use crate::types::{TextsError, VerificationState, VerificationStatus};

/// URL to its most recent status, in the order URLs were first checked.
pub type VerificationResults = IndexMap<String, VerificationStatus>;

pub struct ResourceVerifier {
    http: HttpClient,
    catalog: ResourceCatalog,
}

impl Default for ResourceVerifier {
    fn default() -> Self {
        Self::new(ResourceCatalog::builtin())
    }
}

impl ResourceVerifier {
    pub fn new(catalog: ResourceCatalog) -> Self {
        Self {
            http: HttpClient::default(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// HEAD `url` once and classify the outcome. Never fails.
    pub async fn verify_resource(&self, url: &str) -> VerificationStatus {
        match self.http.head(url).await {
            Ok(resp) => {
                let status = VerificationStatus::from_http_status(resp.status, Utc::now());
                if status.is_verified() {
                    debug!("{url}: {}", resp.status);
                } else {
                    warn!("{url}: {}", status.notes);
                }
                status
            }
            Err(e) => {
                let notes = format!("Error: {}", describe(&e));
                warn!("{url}: {notes}");
                VerificationStatus::failed(Utc::now(), notes)
            }
        }
    }

    /// Check every URL in `catalog`, one at a time, in catalog order.
    /// A URL listed twice keeps the status of its last check.
    pub async fn verify_catalog(&self, catalog: &ResourceCatalog) -> VerificationResults {
        let mut results = VerificationResults::new();
        for url in catalog.urls() {
            let status = self.verify_resource(url).await;
            results.insert(url.to_string(), status);
        }

        let summary = VerificationSummary::from_results(&results);
        info!(
            "verified {} resource(s): {} available, {} failed",
            summary.total, summary.verified, summary.failed
        );
        results
    }

    /// Check the catalog this verifier was built with.
    pub async fn verify_all_resources(&self) -> VerificationResults {
        self.verify_catalog(&self.catalog).await
    }
}

/// Error text with its source chain, e.g.
/// `error sending request for url (...): tcp connect error: Connection refused`.
fn describe(err: &TextsError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Counts over one verification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub verified: usize,
    pub failed: usize,
    pub pending: usize,
}

impl VerificationSummary {
    pub fn from_results(results: &VerificationResults) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for status in results.values() {
            match status.status {
                VerificationState::Verified => summary.verified += 1,
                VerificationState::Failed => summary.failed += 1,
                VerificationState::Pending => summary.pending += 1,
            }
        }
        summary
    }

    pub fn all_verified(&self) -> bool {
        self.verified == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let now = Utc::now();
        let mut results = VerificationResults::new();
        results.insert("https://a/".into(), VerificationStatus::verified(now));
        results.insert("https://b/".into(), VerificationStatus::failed(now, "Failed with status: 404"));
        results.insert("https://c/".into(), VerificationStatus::pending(now));

        let summary = VerificationSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.verified, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.pending, 1);
        assert!(!summary.all_verified());
    }

    #[test]
    fn test_results_keep_insertion_order() {
        let now = Utc::now();
        let mut results = VerificationResults::new();
        results.insert("https://z/".into(), VerificationStatus::verified(now));
        results.insert("https://a/".into(), VerificationStatus::verified(now));
        results.insert("https://z/".into(), VerificationStatus::failed(now, "Failed with status: 500"));

        let keys: Vec<&str> = results.keys().map(String::as_str).collect();
        assert_eq!(keys, ["https://z/", "https://a/"]);
        assert_eq!(results["https://z/"].status, VerificationState::Failed);
    }

    #[test]
    fn test_empty_summary_is_all_verified() {
        let summary = VerificationSummary::from_results(&VerificationResults::new());
        assert_eq!(summary.total, 0);
        assert!(summary.all_verified());
    }

    #[test]
    fn test_describe_appends_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err = TextsError::Io(io);
        assert_eq!(describe(&err), "IO error: missing file");
    }
}
