//! Shared HTTP transport for provider adapters.
//!
//! Handles request pacing and error classification in one place so the
//! adapters stay thin. Deliberately no retry loop: a failed call is reported
//! to the aggregator, which decides between fallback tiers.

use crate::shared::errors::{CatalogError, CatalogResult};
use crate::shared::utils::logger::LogContext;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

/// Rate-paced HTTP client bound to one provider.
pub struct ProviderHttpClient {
    client: Client,
    rate_limiter: DefaultDirectRateLimiter,
    user_agent: String,
    provider_name: String,
}

impl ProviderHttpClient {
    /// Client for the Jikan API (~60 req/min average, short bursts allowed).
    pub fn for_jikan() -> Self {
        Self::new("Jikan", Self::create_rate_limiter(1.0, 3))
    }

    /// Client for the TMDB API (comfortably under their ~50 req/sec cap).
    pub fn for_tmdb() -> Self {
        Self::new("TMDB", Self::create_rate_limiter(4.0, 8))
    }

    pub fn new(provider_name: &str, rate_limiter: DefaultDirectRateLimiter) -> Self {
        Self {
            client: Client::new(),
            rate_limiter,
            user_agent: "medley/0.1".to_string(),
            provider_name: provider_name.to_string(),
        }
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DefaultDirectRateLimiter {
        let period = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::MAX
        };

        let burst = NonZeroU32::new(burst_size.max(1)).unwrap();
        let quota = Quota::with_period(period).unwrap().allow_burst(burst);

        RateLimiter::direct(quota)
    }

    /// Whether a request would go out immediately (for tests and monitoring).
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    /// Paced GET returning a decoded JSON body.
    ///
    /// Status classification: 429 is rate limiting, 404 is `NotFound` (the
    /// adapters translate that into `Ok(None)` for point lookups), anything
    /// else non-2xx means the provider is unavailable. A 2xx body that fails
    /// to decode is a malformed response.
    pub async fn get<T>(&self, url: &str) -> CatalogResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.rate_limiter.until_ready().await;

        LogContext::api_call(&self.provider_name, url, "start", None);
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => {}
            429 => {
                return Err(CatalogError::ProviderRateLimited(format!(
                    "{} throttled the request",
                    self.provider_name
                )))
            }
            404 => {
                return Err(CatalogError::NotFound(format!(
                    "{}: no resource at {}",
                    self.provider_name, url
                )))
            }
            _ => {
                return Err(CatalogError::ProviderUnavailable(format!(
                    "{} answered HTTP {}",
                    self.provider_name, status
                )))
            }
        }

        let body = response.json::<T>().await.map_err(|e| {
            CatalogError::ProviderMalformedResponse(format!(
                "{}: undecodable response body: {}",
                self.provider_name, e
            ))
        })?;

        LogContext::api_call(
            &self.provider_name,
            url,
            status.as_str(),
            Some(started.elapsed().as_millis() as u64),
        );
        Ok(body)
    }
}
