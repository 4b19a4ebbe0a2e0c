//! HTTP access to the materials catalog and the quote webhook.
//!
//! Both calls are one-shot: no retries and no cancellation. A failure is
//! reported to the caller, which decides how to surface it.

use crate::catalog::Catalog;
use crate::error::{QuoteError, Result};
use crate::submission::QuoteSubmission;
use log::{debug, warn};
use reqwest::{Client, Response};

/// Thin wrapper over a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct QuoteClient {
    http: Client,
}

impl QuoteClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Uses a preconfigured client, e.g. one with custom timeouts or proxies.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Fetches and validates the catalog.
    pub async fn fetch_catalog(&self, url: &str) -> Result<Catalog> {
        debug!("Fetching catalog from {}", url);
        let response = self.http.get(url).send().await?;
        let response = ensure_success(url, response)?;

        let body = response.text().await?;
        Catalog::from_json_str(&body)
    }

    /// Posts the quote as JSON. Any non-2xx answer is an error.
    pub async fn submit_quote(&self, url: &str, submission: &QuoteSubmission) -> Result<()> {
        debug!("Submitting quote '{}' to {}", submission.offer_name, url);
        let response = self.http.post(url).json(submission).send().await?;
        ensure_success(url, response)?;

        debug!("Quote accepted by {}", url);
        Ok(())
    }
}

fn ensure_success(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    debug!("Response from {}: {}", url, status);

    if status.is_success() {
        Ok(response)
    } else {
        warn!("{} answered with status {}", url, status);
        Err(QuoteError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}
