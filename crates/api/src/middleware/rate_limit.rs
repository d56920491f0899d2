//! Fixed-window login rate limiting.
//!
//! Each client key gets `max_attempts` per window; the window restarts on the
//! first attempt after it lapses. The table lives in process memory, so
//! limits are per instance.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::state::AppState;

/// Table size above which lapsed windows are swept on insert.
const PRUNE_THRESHOLD: usize = 1024;

/// Key used when the client address cannot be determined.
const UNKNOWN_CLIENT: &str = "unknown";

struct Window {
    start: Instant,
    count: u32,
}

/// A rejected attempt: the limit and the seconds until the window resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimited {
    pub limit: u32,
    pub retry_after_secs: u64,
}

impl From<RateLimited> for AppError {
    fn from(r: RateLimited) -> Self {
        AppError::TooManyRequests {
            limit: r.limit,
            retry_after_secs: r.retry_after_secs,
        }
    }
}

pub struct LoginRateLimiter {
    max_attempts: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl LoginRateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one attempt for `key`.
    pub fn check(&self, key: &str) -> Result<(), RateLimited> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<(), RateLimited> {
        // Nothing below panics while holding the lock.
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if windows.len() >= PRUNE_THRESHOLD && !windows.contains_key(key) {
            let period = self.window;
            windows.retain(|_, w| now.duration_since(w.start) < period);
        }

        let window = windows.entry(key.to_string()).or_insert(Window {
            start: now,
            count: 0,
        });
        if now.duration_since(window.start) >= self.window {
            window.start = now;
            window.count = 0;
        }

        if window.count >= self.max_attempts {
            let elapsed = now.duration_since(window.start);
            let remaining = self.window.saturating_sub(elapsed);
            return Err(RateLimited {
                limit: self.max_attempts,
                retry_after_secs: remaining.as_secs().max(1),
            });
        }

        window.count += 1;
        Ok(())
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.windows.lock().map(|w| w.len()).unwrap_or(0)
    }
}

/// Client key for rate limiting: the first `X-Forwarded-For` hop when
/// proxy headers are trusted, else the socket peer IP, else `"unknown"`.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(first_hop) = forwarded {
            return first_hop.to_string();
        }
    }
    match peer {
        Some(addr) => addr.ip().to_string(),
        None => UNKNOWN_CLIENT.to_string(),
    }
}

/// Extractor that spends one login attempt for the calling client.
///
/// Place it before the body extractor so malformed attempts count too.
pub struct LoginThrottle;

impl FromRequestParts<AppState> for LoginThrottle {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let key = client_key(&parts.headers, peer, state.config.trust_proxy_headers);

        state.login_limiter.check(&key).map_err(|limited| {
            tracing::info!(client = %key, "Login rate limit exceeded");
            AppError::from(limited)
        })?;
        Ok(LoginThrottle)
    }
}
