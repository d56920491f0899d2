use std::sync::Arc;
use std::time::Duration;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;
use crate::middleware::rate_limit::LoginRateLimiter;

/// Password hashed once at startup and verified against when a login names
/// an unknown user, so both paths cost one Argon2 verification.
const DUMMY_PASSWORD: &str = "quill-dummy-password-0";

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: quill_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// PHC hash of a throwaway password.
    pub dummy_password_hash: Arc<str>,
    /// Per-client login attempt counter.
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    /// Build the state, hashing the dummy password once.
    pub fn new(
        pool: quill_db::DbPool,
        config: ServerConfig,
    ) -> Result<Self, argon2::password_hash::Error> {
        let dummy_password_hash: Arc<str> = hash_password(DUMMY_PASSWORD)?.into();
        let limits = config.login_rate_limit;
        let login_limiter = Arc::new(LoginRateLimiter::new(
            limits.max_attempts,
            Duration::from_secs(limits.window_secs),
        ));

        Ok(Self {
            pool,
            config: Arc::new(config),
            dummy_password_hash,
            login_limiter,
        })
    }
}
