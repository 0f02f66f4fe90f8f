//! Per-client request rate limiting
//!
//! Sliding-window limiter keyed by client identity. Each client may make
//! `max_requests` requests within any `window` span; further requests are
//! rejected with 429 until the oldest request in the window ages out.

use crate::config::RateLimitConfig;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Bucket shared by requests whose origin cannot be determined
const UNKNOWN_CLIENT: &str = "unknown";

/// Lower bound for the idle-window pruning period
pub const MIN_CLEANUP_PERIOD: Duration = Duration::from_secs(1);

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

#[derive(Debug, Default)]
struct RequestWindow {
    timestamps: VecDeque<Instant>,
}

impl RequestWindow {
    fn evict_expired(&mut self, now: Instant, window: Duration) {
        while let Some(oldest) = self.timestamps.front() {
            if *oldest + window <= now {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}

/// In-process sliding-window rate limiter
pub struct RateLimiter {
    windows: RwLock<HashMap<String, RequestWindow>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            window,
            max_requests,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(Duration::from_secs(config.window_secs), config.max_requests)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a request for `client` if it is within quota
    pub async fn check(&self, client: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut windows = self.windows.write().await;
        let entry = windows.entry(client.to_string()).or_default();
        entry.evict_expired(now, self.window);

        if entry.timestamps.len() < self.max_requests as usize {
            entry.timestamps.push_back(now);
            let used = entry.timestamps.len() as u32;
            RateLimitDecision::Allowed {
                remaining: self.max_requests - used,
            }
        } else {
            let retry_after = entry
                .timestamps
                .front()
                .map(|oldest| (*oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window);
            RateLimitDecision::Limited { retry_after }
        }
    }

    /// Drop windows with no requests left in them. Returns how many were removed.
    pub async fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|_, w| {
            w.evict_expired(now, self.window);
            !w.timestamps.is_empty()
        });
        before - windows.len()
    }

    /// Number of clients currently tracked
    pub async fn tracked_clients(&self) -> usize {
        self.windows.read().await.len()
    }

    /// Periodically prune idle client windows
    ///
    /// Periods shorter than [`MIN_CLEANUP_PERIOD`] are raised to it.
    pub fn spawn_cleanup(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        let period = every.max(MIN_CLEANUP_PERIOD);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let removed = self.cleanup().await;
                if removed > 0 {
                    debug!(removed, "Pruned idle rate limit windows");
                }
            }
        })
    }
}

/// Determine the identity a request is rate limited under
///
/// With `trust_forwarded_for`, the last `X-Forwarded-For` entry is used:
/// it is the one appended by the proxy in front of us. Entries to its left
/// are supplied by the client and never identify it.
pub fn client_identity(request: &Request, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = request
            .headers()
            .get_all("x-forwarded-for")
            .iter()
            .last()
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(addr) = forwarded {
            return addr.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Middleware rejecting clients over their request quota
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let settings = &state.config().rate_limit;
    if !settings.enabled {
        return Ok(next.run(request).await);
    }

    let client = client_identity(&request, settings.trust_forwarded_for);
    match state.rate_limiter().check(&client).await {
        RateLimitDecision::Allowed { .. } => Ok(next.run(request).await),
        RateLimitDecision::Limited { retry_after } => {
            warn!(client = %client, "Rate limit exceeded");
            // Round up so clients never retry early
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            Err(ApiError::RateLimited {
                retry_after_secs: secs.max(1),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;
    use rstest::rstest;

    #[tokio::test(start_paused = true)]
    async fn test_allows_up_to_limit_then_rejects() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 3);

        for expected_remaining in [2, 1, 0] {
            assert_eq!(
                limiter.check("10.0.0.1").await,
                RateLimitDecision::Allowed {
                    remaining: expected_remaining
                }
            );
        }

        assert!(matches!(
            limiter.check("10.0.0.1").await,
            RateLimitDecision::Limited { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clients_are_limited_independently() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);

        assert!(matches!(limiter.check("a").await, RateLimitDecision::Allowed { .. }));
        assert!(matches!(limiter.check("a").await, RateLimitDecision::Limited { .. }));
        assert!(matches!(limiter.check("b").await, RateLimitDecision::Allowed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_slides() {
        let limiter = RateLimiter::new(Duration::from_secs(10), 2);

        limiter.check("c").await;
        tokio::time::advance(Duration::from_secs(6)).await;
        limiter.check("c").await;

        match limiter.check("c").await {
            RateLimitDecision::Limited { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(4));
            }
            other => panic!("expected limit, got {:?}", other),
        }

        // First request ages out; one slot frees up
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(matches!(limiter.check("c").await, RateLimitDecision::Allowed { .. }));
        assert!(matches!(limiter.check("c").await, RateLimitDecision::Limited { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_survives_zero_period() {
        let limiter = Arc::new(RateLimiter::new(Duration::ZERO, 10));
        let handle = Arc::clone(&limiter).spawn_cleanup(limiter.window());

        tokio::time::advance(MIN_CLEANUP_PERIOD * 3).await;
        tokio::task::yield_now().await;

        assert!(!handle.is_finished());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_removes_idle_windows() {
        let limiter = RateLimiter::new(Duration::from_secs(5), 10);
        limiter.check("idle").await;
        assert_eq!(limiter.tracked_clients().await, 1);

        tokio::time::advance(Duration::from_secs(6)).await;
        limiter.check("active").await;

        assert_eq!(limiter.cleanup().await, 1);
        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[rstest]
    #[case::proxy_appended_entry("203.0.113.7, 10.0.0.1", "10.0.0.1")]
    #[case::single_entry("198.51.100.9", "198.51.100.9")]
    #[case::padded("  spoofed , 198.51.100.9  ", "198.51.100.9")]
    fn test_client_identity_uses_last_forwarded_entry(#[case] header: &str, #[case] expected: &str) {
        let request = http::Request::builder()
            .header("x-forwarded-for", header)
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_identity(&request, true), expected);
        assert_eq!(client_identity(&request, false), UNKNOWN_CLIENT);
    }

    #[test]
    fn test_client_identity_uses_last_forwarded_header_line() {
        let request = http::Request::builder()
            .header("x-forwarded-for", "1.1.1.1")
            .header("x-forwarded-for", "198.51.100.9")
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_identity(&request, true), "198.51.100.9");
    }

    #[test]
    fn test_empty_forwarded_entry_falls_back_to_peer() {
        let mut request = http::Request::builder()
            .header("x-forwarded-for", "10.0.0.1, ")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 5555))));

        assert_eq!(client_identity(&request, true), "192.0.2.10");
    }

    #[test]
    fn test_client_identity_uses_peer_address() {
        let mut request = http::Request::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 5555))));

        assert_eq!(client_identity(&request, false), "192.0.2.10");
    }
}
