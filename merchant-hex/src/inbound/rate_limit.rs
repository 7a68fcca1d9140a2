//! Rate limiting middleware using Governor.
//!
//! Implements per-merchant rate limiting with a token bucket algorithm.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use merchant_types::MerchantSession;
use serde_json::json;
use std::{num::NonZeroU32, sync::Arc, time::Duration};

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// Per-key rate limiters
    limiters: DashMap<String, Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>>,
    /// Default quota for new keys
    quota: Quota,
    /// Seconds advertised to throttled clients
    retry_after: u64,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state.
    ///
    /// `requests` may be spent as a burst and refill evenly over `period`.
    /// A zero request count is treated as one.
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiters: DashMap::new(),
            quota,
            retry_after: period.as_secs().max(1),
        }
    }

    /// Number of buckets currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.limiters.len()
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, key: &str) -> bool {
        let limiter = self
            .limiters
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(RateLimiter::direct(self.quota)));

        limiter.check().is_ok()
    }
}

/// Picks the bucket for a request.
///
/// Runs after authentication, so buckets exist only for merchants that
/// actually authenticated; public paths share the `anonymous` bucket.
fn bucket_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MerchantSession>()
        .map(|session| format!("merchant:{}", session.merchant.id))
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let key = bucket_key(&request);

    if !limiter.check(&key) {
        tracing::warn!("rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "retry_after_seconds": limiter.retry_after
            })),
        )
            .into_response();
    }

    next.run(request).await
}
