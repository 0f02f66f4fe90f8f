//! Application state management
//!
//! Shared state passed to all request handlers via Axum's state extraction.
//! Everything here is built once at startup and is read-only afterwards,
//! except the rate limiter's internal window table.

use crate::auth::{JwtService, RateLimiter};
use crate::config::AppConfig;
use horoscope_shared::HoroscopeCatalog;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone (pool and Arcs).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Daily message catalog
    pub catalog: Arc<HoroscopeCatalog>,
    /// Per-client request limiter for the API routes
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives JWT keys from the configured secret, so call once at startup.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret);
        let rate_limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));

        Self {
            db,
            config: Arc::new(config),
            jwt,
            catalog: Arc::new(HoroscopeCatalog::standard()),
            rate_limiter,
        }
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn catalog(&self) -> &HoroscopeCatalog {
        &self.catalog
    }

    #[inline]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
