//! Artifact download over HTTPS.

use crate::{Error, Result};
use reqwest::Client;
use tracing::debug;

/// HTTP client wrapper for fetching release artifacts.
pub struct Fetcher {
    client: Client,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    /// Create a new fetcher.
    ///
    /// # Panics
    ///
    /// Uses `expect` internally because `reqwest::Client::builder().build()`
    /// only fails with invalid TLS or proxy configuration, neither of which
    /// can happen with default settings and a user agent.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("formulary")
                .build()
                .expect("Failed to create HTTP client - TLS backend initialization failed"),
        }
    }

    /// Download the artifact at `url` into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Download`] on transport failure or a non-success
    /// HTTP status.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(%url, "Downloading artifact");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::download(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| Error::download(url, e.to_string()))
    }
}
