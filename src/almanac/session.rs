// src/almanac/session.rs
use std::time::Duration;

use crate::almanac::client::PageFetcher;
use crate::utils::error::FetchError;

/// The single fetch session bound for a whole run. Every page load goes
/// through it, one at a time; `close` consumes it.
pub struct FetchSession {
    fetcher: Box<dyn PageFetcher>,
    timeout: Duration,
    pages_loaded: usize,
}

impl FetchSession {
    pub fn open(fetcher: Box<dyn PageFetcher>, timeout: Duration) -> Self {
        tracing::info!("Opened {} fetch session (timeout {}s)", fetcher.name(), timeout.as_secs());
        Self {
            fetcher,
            timeout,
            pages_loaded: 0,
        }
    }

    /// Fetches `url` and waits for the backend to report the page ready,
    /// failing with `FetchError::Timeout` once the bounded wait elapses.
    pub async fn load(&mut self, url: &str) -> Result<String, FetchError> {
        let fetcher = &self.fetcher;
        let navigation = async {
            let html = fetcher.fetch(url).await?;
            fetcher.wait_until_ready().await?;
            Ok::<_, FetchError>(html)
        };

        let html = tokio::time::timeout(self.timeout, navigation)
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            })??;

        self.pages_loaded += 1;
        Ok(html)
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    pub async fn close(self) {
        match self.fetcher.close().await {
            Ok(()) => tracing::info!(
                "Closed {} fetch session after {} pages",
                self.fetcher.name(),
                self.pages_loaded
            ),
            Err(e) => tracing::warn!("Error closing {} fetch session: {}", self.fetcher.name(), e),
        }
    }
}
