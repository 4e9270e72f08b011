//! Article service client with exponential backoff retry logic.
//!
//! The article service exposes three endpoints:
//! - `GET /health` — liveness probe
//! - `POST /api/fetch-articles` — kick off a topic search (slow; the service
//!   scrapes and filters articles before responding)
//! - `GET /articles.csv` — download the resulting CSV feed
//!
//! # Architecture
//!
//! The module uses a trait-based design:
//! - [`FetchAsync`]: Core trait for fetching a CSV feed for a topic set
//! - [`ArticleService`]: The `reqwest`-backed implementation
//! - [`RetryFetch`]: Decorator that adds retry logic to any `FetchAsync`
//!
//! # Failure Policy
//!
//! Every failure here is recoverable: callers fall back to a cached CSV or
//! the mock headline catalog. A missing or malformed API key skips the live
//! fetch entirely rather than erroring.

use crate::topics::Topic;
use once_cell::sync::Lazy;
use rand::{rng, Rng};
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};
use url::Url;

/// Shape of a valid article-service API key.
static API_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^AIza[0-9A-Za-z_-]{35}$").unwrap());

/// Check whether an API key looks valid without calling the service.
pub fn api_key_is_valid(key: &str) -> bool {
    API_KEY_RE.is_match(key)
}

/// Response envelope from `POST /api/fetch-articles`.
#[derive(Debug, Deserialize)]
struct FetchArticlesResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Trait for async CSV feed retrieval.
///
/// Implementors take a topic selection and return the raw CSV text of the
/// matching article feed. The abstraction exists so [`RetryFetch`] can wrap
/// any backend.
pub trait FetchAsync {
    /// The type of feed returned.
    type Response;

    /// Fetch the article feed for the given topics.
    async fn fetch(&self, topics: &[Topic]) -> Result<Self::Response, Box<dyn Error>>;
}

/// Decorator that adds exponential backoff retry logic to any [`FetchAsync`].
///
/// # Backoff Strategy
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    /// Maximum number of retry attempts before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync + fmt::Debug,
{
    type Response = T::Response;

    #[instrument(level = "info", skip_all)]
    async fn fetch(&self, topics: &[Topic]) -> Result<Self::Response, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(topics).await {
                Ok(resp) => {
                    return Ok(resp);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// `reqwest`-backed client for the article service.
#[derive(Debug)]
pub struct ArticleService {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl ArticleService {
    /// Build a client for the service at `base_url`.
    ///
    /// Fails if the URL doesn't parse or the API key doesn't match the
    /// expected shape; callers treat either as "no live feed available".
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout: StdDuration,
    ) -> Result<Self, Box<dyn Error>> {
        if !api_key_is_valid(api_key) {
            return Err("Invalid API key format".into());
        }
        let base_url = Url::parse(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(ArticleService {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Probe `GET /health`.
    #[instrument(level = "info", skip_all)]
    pub async fn health(&self) -> bool {
        let url = match self.base_url.join("/health") {
            Ok(url) => url,
            Err(_) => return false,
        };
        match self.client.get(url).send().await {
            Ok(resp) => {
                let healthy = resp.status().is_success();
                info!(healthy, "Article service health check");
                healthy
            }
            Err(e) => {
                warn!(error = %e, "Article service unreachable");
                false
            }
        }
    }

    /// Ask the service to search for articles on the given topics.
    ///
    /// This call blocks server-side until the search finishes, which can
    /// take many minutes on a cold topic.
    async fn request_articles(&self, topics: &[Topic]) -> Result<(), Box<dyn Error>> {
        let url = self.base_url.join("/api/fetch-articles")?;
        let topic_names: Vec<&str> = topics.iter().map(|t| t.slug()).collect();

        let resp = self
            .client
            .post(url)
            .json(&serde_json::json!({
                "topics": topic_names,
                "api_key": self.api_key,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, body = %crate::utils::truncate_for_log(&body, 300), "Article search failed");
            return Err(format!("Article search failed with status {status}").into());
        }

        let envelope: FetchArticlesResponse = resp.json().await?;
        if !envelope.success {
            let reason = envelope.error.unwrap_or_else(|| "Unknown error".to_string());
            return Err(format!("Article search reported failure: {reason}").into());
        }
        Ok(())
    }

    /// Download the CSV feed produced by the last search.
    async fn download_csv(&self) -> Result<String, Box<dyn Error>> {
        let url = self.base_url.join("/articles.csv")?;
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("CSV download failed with status {status}").into());
        }
        let text = resp.text().await?;
        info!(bytes = text.len(), "Downloaded article CSV");
        Ok(text)
    }
}

impl FetchAsync for ArticleService {
    type Response = String;

    #[instrument(level = "info", skip_all, fields(topics = topics.len()))]
    async fn fetch(&self, topics: &[Topic]) -> Result<Self::Response, Box<dyn Error>> {
        let t0 = Instant::now();
        self.request_articles(topics).await?;
        let csv = self.download_csv().await?;
        info!(
            elapsed_ms = t0.elapsed().as_millis() as u128,
            bytes = csv.len(),
            "Fetched live article feed"
        );
        Ok(csv)
    }
}

/// Fetch the article feed with exponential backoff retry logic.
///
/// This is the primary entry point for live feed retrieval. Retry counts
/// match the upstream search pipeline: 3 attempts, 1 second base delay.
#[instrument(level = "info", skip_all)]
pub async fn fetch_with_backoff(
    service: ArticleService,
    topics: &[Topic],
) -> Result<String, Box<dyn Error>> {
    let t0 = Instant::now();
    let api = RetryFetch::new(service, 3, StdDuration::from_secs(1));
    let res = api.fetch(topics).await;
    let dt = t0.elapsed();

    match &res {
        Ok(csv) => info!(
            elapsed_ms_total = dt.as_millis() as u128,
            bytes = csv.len(),
            "fetch_with_backoff succeeded"
        ),
        Err(e) => {
            error!(elapsed_ms_total = dt.as_millis() as u128, error = %e, "fetch_with_backoff failed")
        }
    }
    res
}
