// src/almanac/client.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use crate::utils::error::FetchError;

/// Supplies rendered page HTML for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Backend label used in logs.
    fn name(&self) -> &'static str;

    /// Navigates to `url` and returns the page markup.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// Blocks until the last fetched page is safe to extract from.
    async fn wait_until_ready(&self) -> Result<(), FetchError> {
        Ok(())
    }

    /// Releases backend resources. Called once when the session ends.
    async fn close(&self) -> Result<(), FetchError> {
        Ok(())
    }
}

/// Creates a reqwest client configured for almanac interaction.
fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(FetchError::Network)
}

/// Plain HTTP GET backend. The almanac pages are server-rendered, so readiness
/// is a fixed settle delay between navigations.
pub struct HttpFetcher {
    client: reqwest::Client,
    settle: Duration,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration, settle: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(user_agent, timeout)?,
            settle,
            timeout_secs: timeout.as_secs(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::FORBIDDEN {
                tracing::warn!("Received 403 Forbidden - check User-Agent and request pacing.");
            }
            return Err(FetchError::Http { status, url: url.to_string() });
        }

        let body = response.text().await
            .map_err(|e| FetchError::from_reqwest(e, url, self.timeout_secs))?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }

    async fn wait_until_ready(&self) -> Result<(), FetchError> {
        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }
        Ok(())
    }
}

/// Rendering backend backed by a Browserless `/content` endpoint. The service
/// waits for network idle before returning, so the page is ready on return.
pub struct BrowserlessFetcher {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
}

impl BrowserlessFetcher {
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            timeout_secs: timeout.as_secs(),
        })
    }

    fn endpoint(&self) -> String {
        let mut endpoint = format!("{}/content", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }
        endpoint
    }
}

#[async_trait]
impl PageFetcher for BrowserlessFetcher {
    fn name(&self) -> &'static str {
        "browserless"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let body = serde_json::json!({
            "url": url,
            "gotoOptions": { "waitUntil": "networkidle2" },
        });

        let resp = self
            .client
            .post(self.endpoint())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url, self.timeout_secs))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FetchError::Browserless {
                status: status.as_u16(),
                message,
            });
        }

        resp.text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url, self.timeout_secs))
    }
}

/// Serves pages from a cache directory, falling back to `inner` on a miss.
/// With no inner fetcher the cache is the only source (offline mode).
pub struct CachedFetcher {
    inner: Option<Box<dyn PageFetcher>>,
    cache_dir: PathBuf,
}

impl CachedFetcher {
    pub fn new<P: AsRef<Path>>(cache_dir: P, inner: Option<Box<dyn PageFetcher>>) -> Self {
        Self {
            inner,
            cache_dir: cache_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the cache file path for a URL
    pub fn cache_path(&self, url: &str) -> PathBuf {
        let filename = url
            .replace("https://", "")
            .replace("http://", "")
            .replace(['/', '?', '&', '='], "_")
            + ".html";
        self.cache_dir.join(filename)
    }
}

#[async_trait]
impl PageFetcher for CachedFetcher {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let path = self.cache_path(url);
        if path.exists() {
            tracing::debug!("Loading from cache: {}", path.display());
            return Ok(tokio::fs::read_to_string(&path).await?);
        }

        let Some(inner) = &self.inner else {
            return Err(FetchError::CacheMiss(url.to_string()));
        };

        let html = inner.fetch(url).await?;
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        tokio::fs::write(&path, &html).await?;
        tracing::debug!("Saved to cache: {}", path.display());
        Ok(html)
    }

    async fn wait_until_ready(&self) -> Result<(), FetchError> {
        match &self.inner {
            Some(inner) => inner.wait_until_ready().await,
            None => Ok(()),
        }
    }

    async fn close(&self) -> Result<(), FetchError> {
        match &self.inner {
            Some(inner) => inner.close().await,
            None => Ok(()),
        }
    }
}
