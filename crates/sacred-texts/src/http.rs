//! Async HTTP client wrapping reqwest.
//!
//! One attempt per call. No retries, no backoff and no timeout beyond the
//! reqwest defaults; callers decide what a failure means.

use crate::types::TextsResult;

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Response from an HTTP HEAD request.
#[derive(Debug, Clone)]
pub struct HeadResponse {
    /// Requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
}

/// Shared HTTP client for provider lookups and resource checks.
#[derive(Clone, Default)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client. Without a user agent reqwest sends none.
    pub fn new(user_agent: Option<&str>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua);
        }
        let client = builder.build().unwrap_or_default();
        Self { client }
    }

    /// Perform a single GET with optional extra headers.
    ///
    /// Non-2xx responses are returned, not raised; only transport failures
    /// become errors.
    pub async fn get(&self, url: &str, headers: &[(&str, String)]) -> TextsResult<HttpResponse> {
        let mut builder = self.client.get(url);
        for (name, value) in headers {
            builder = builder.header(*name, value.as_str());
        }

        let r = builder.send().await?;
        let status = r.status().as_u16();
        let body = r.text().await.unwrap_or_default();

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            body,
        })
    }

    /// Perform a single HEAD with no custom headers.
    pub async fn head(&self, url: &str) -> TextsResult<HeadResponse> {
        let r = self.client.head(url).send().await?;
        Ok(HeadResponse {
            url: url.to_string(),
            final_url: r.url().to_string(),
            status: r.status().as_u16(),
        })
    }
}
