use crate::auth::jwt::JwtConfig;

/// Output format of the tracing subscriber, from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines (default).
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; `json` selects JSON, anything else the default.
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Fixed-window limits for `POST /auth/login`.
#[derive(Debug, Clone, Copy)]
pub struct LoginRateLimitConfig {
    /// Attempts allowed per window and client (default: `10`).
    pub max_attempts: u32,
    /// Window length in seconds (default: `60`).
    pub window_secs: u64,
}

/// First admin created at startup when the users table is empty.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum database connections in the pool (default: `20`).
    pub db_max_connections: u32,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    pub login_rate_limit: LoginRateLimitConfig,
    /// Key the login limiter on the first `X-Forwarded-For` hop instead of
    /// the socket peer (default: `false`). Only enable behind a proxy.
    pub trust_proxy_headers: bool,
    /// Set when `DEFAULT_ADMIN_PASSWORD` is present.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                                         |
    /// |--------------------------------|-------------------------------------------------|
    /// | `HOST`                         | `0.0.0.0`                                       |
    /// | `PORT`                         | `3000`                                          |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173,http://127.0.0.1:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                                            |
    /// | `DB_MAX_CONNECTIONS`           | `20`                                            |
    /// | `LOGIN_RATE_LIMIT_MAX`         | `10`                                            |
    /// | `LOGIN_RATE_LIMIT_WINDOW_SECS` | `60`                                            |
    /// | `TRUST_PROXY_HEADERS`          | `false`                                         |
    /// | `DEFAULT_ADMIN_PASSWORD`       | unset                                           |
    /// | `BOOTSTRAP_ADMIN_USERNAME`     | `admin`                                         |
    /// | `BOOTSTRAP_ADMIN_EMAIL`        | `admin@localhost`                               |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on any malformed value so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_parse("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_parse("REQUEST_TIMEOUT_SECS", 30);
        let db_max_connections: u32 = env_parse("DB_MAX_CONNECTIONS", 20);

        let login_rate_limit = LoginRateLimitConfig {
            max_attempts: env_parse("LOGIN_RATE_LIMIT_MAX", 10),
            window_secs: env_parse("LOGIN_RATE_LIMIT_WINDOW_SECS", 60),
        };
        assert!(
            login_rate_limit.max_attempts > 0 && login_rate_limit.window_secs > 0,
            "LOGIN_RATE_LIMIT_MAX and LOGIN_RATE_LIMIT_WINDOW_SECS must be positive"
        );

        let trust_proxy_headers = env_flag("TRUST_PROXY_HEADERS");

        let bootstrap_admin = std::env::var("DEFAULT_ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .map(|password| BootstrapAdmin {
                username: std::env::var("BOOTSTRAP_ADMIN_USERNAME")
                    .unwrap_or_else(|_| "admin".into()),
                email: std::env::var("BOOTSTRAP_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@localhost".into()),
                password,
            });

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            jwt,
            login_rate_limit,
            trust_proxy_headers,
            bootstrap_admin,
        }
    }
}

/// Parse `name` from the environment, or return `default` when unset.
fn env_parse<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} is invalid ('{raw}'): {e}")),
        Err(_) => default,
    }
}

/// `1`, `true` or `yes` (any case) enable a flag; anything else disables it.
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
