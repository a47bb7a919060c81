//! Sliding-window rate limiting.
//!
//! Each client identifier keeps the timestamps of its recent requests. A request is
//! accepted while fewer than `max_requests` timestamps fall inside the trailing window.
//! State is in-memory and process-local.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

/// How often idle clients are reclaimed.
pub const REAP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Clients with no activity for this long are forgotten by the reaper.
pub const IDLE_EVICTION: Duration = Duration::from_secs(60 * 60);

/// A request budget over a trailing time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: usize,
    pub window: Duration,
}

impl RateLimitPolicy {
    /// Authentication endpoints: 10 requests per minute.
    pub const STRICT: Self = Self {
        max_requests: 10,
        window: Duration::from_secs(60),
    };

    /// Every endpoint: 100 requests per minute.
    pub const GENERAL: Self = Self {
        max_requests: 100,
        window: Duration::from_secs(60),
    };
}

#[derive(Debug)]
struct Visitor {
    requests: VecDeque<Instant>,
    last_seen: Instant,
}

/// Per-client sliding-window limiter.
#[derive(Debug, Default)]
pub struct SlidingWindowLimiter {
    visitors: Mutex<HashMap<String, Visitor>>,
}

impl SlidingWindowLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check and record a request for `client` at the current instant.
    pub fn allow(&self, client: &str, max_requests: usize, window: Duration) -> bool {
        self.allow_at(client, max_requests, window, Instant::now())
    }

    /// Check and record a request for `client` at `now`.
    ///
    /// Rejected requests are not recorded, but they still count as activity
    /// for idle eviction.
    pub fn allow_at(
        &self,
        client: &str,
        max_requests: usize,
        window: Duration,
        now: Instant,
    ) -> bool {
        let mut visitors = self.lock();
        let visitor = visitors.entry(client.to_string()).or_insert_with(|| Visitor {
            requests: VecDeque::new(),
            last_seen: now,
        });

        if let Some(cutoff) = now.checked_sub(window) {
            while visitor.requests.front().is_some_and(|t| *t <= cutoff) {
                visitor.requests.pop_front();
            }
        }
        visitor.last_seen = now;

        if visitor.requests.len() >= max_requests {
            return false;
        }

        visitor.requests.push_back(now);
        true
    }

    /// Drop clients idle for longer than `idle`. Returns how many were removed.
    pub fn evict_idle(&self, idle: Duration) -> usize {
        self.evict_idle_at(idle, Instant::now())
    }

    pub fn evict_idle_at(&self, idle: Duration, now: Instant) -> usize {
        let Some(cutoff) = now.checked_sub(idle) else {
            return 0;
        };
        let mut visitors = self.lock();
        let before = visitors.len();
        visitors.retain(|_, visitor| visitor.last_seen >= cutoff);
        before - visitors.len()
    }

    /// Number of tracked clients.
    #[cfg(test)]
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Visitor>> {
        self.visitors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A limiter bound to the policy it enforces.
#[derive(Debug, Clone)]
pub struct RateLimit {
    pub limiter: Arc<SlidingWindowLimiter>,
    pub policy: RateLimitPolicy,
}

impl RateLimit {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            limiter: Arc::new(SlidingWindowLimiter::new()),
            policy,
        }
    }
}

/// Rate limiting layer function that takes the limit to enforce as a parameter.
pub async fn rate_limit_layer(limit: RateLimit, request: Request, next: Next) -> Response {
    let client = client_id(&request);

    if limit
        .limiter
        .allow(&client, limit.policy.max_requests, limit.policy.window)
    {
        next.run(request).await
    } else {
        tracing::debug!(client = %client, "rate limit exceeded");
        AppError::TooManyRequests.into_response()
    }
}

/// Identify the caller: peer address, else first `X-Forwarded-For` entry.
fn client_id(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Spawn the periodic reclamation task for the given limiters.
pub fn spawn_reaper(limiters: Vec<Arc<SlidingWindowLimiter>>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REAP_INTERVAL);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let evicted: usize = limiters
                .iter()
                .map(|limiter| limiter.evict_idle(IDLE_EVICTION))
                .sum();
            tracing::debug!(evicted, "rate limiter reaper pass");
        }
    })
}
