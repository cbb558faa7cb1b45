use learnpath_core::recommendation::{
    validate_limit, validate_recent_activity_days, DEFAULT_RECENT_ACTIVITY_DAYS,
    DEFAULT_RECOMMENDATION_LIMIT,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except the JWT secret has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Recommendations generated when a request omits `limit` (default: `5`).
    pub recommendation_default_limit: i32,
    /// Trailing days of activity that count as recent (default: `7`).
    pub recent_activity_window_days: i64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `HOST`                         | `0.0.0.0`               |
    /// | `PORT`                         | `3000`                  |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                    |
    /// | `RECOMMENDATION_DEFAULT_LIMIT` | `5`                     |
    /// | `RECENT_ACTIVITY_WINDOW_DAYS`  | `7`                     |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparsable values, a default limit outside `1..=50`, or a
    /// recent-activity window outside `1..=365`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let recommendation_default_limit: i32 = std::env::var("RECOMMENDATION_DEFAULT_LIMIT")
            .unwrap_or_else(|_| DEFAULT_RECOMMENDATION_LIMIT.to_string())
            .parse()
            .expect("RECOMMENDATION_DEFAULT_LIMIT must be a valid i32");
        if let Err(e) = validate_limit(recommendation_default_limit) {
            panic!("RECOMMENDATION_DEFAULT_LIMIT is out of range: {e}");
        }

        let recent_activity_window_days: i64 = std::env::var("RECENT_ACTIVITY_WINDOW_DAYS")
            .unwrap_or_else(|_| DEFAULT_RECENT_ACTIVITY_DAYS.to_string())
            .parse()
            .expect("RECENT_ACTIVITY_WINDOW_DAYS must be a valid i64");
        if let Err(e) = validate_recent_activity_days(recent_activity_window_days) {
            panic!("RECENT_ACTIVITY_WINDOW_DAYS is out of range: {e}");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            recommendation_default_limit,
            recent_activity_window_days,
            jwt: JwtConfig::from_env(),
        }
    }
}
