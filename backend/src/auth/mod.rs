//! Authentication module
//!
//! JWT session tokens, argon2 password hashing, and the gateway
//! middleware (bearer authentication and per-client rate limiting).

mod jwt;
mod middleware;
mod password;
pub mod rate_limit;

pub use jwt::{Claims, JwtService, TOKEN_LIFETIME_SECS};
pub use middleware::{auth_middleware, authenticate, AuthUser};
pub use password::PasswordService;
pub use rate_limit::{rate_limit_middleware, RateLimiter};
