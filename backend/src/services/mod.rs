//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the pure domain logic in `horoscope-shared`.

pub mod account;
pub mod horoscope;

pub use account::{AccountService, SignupInput};
pub use horoscope::{HoroscopeService, HISTORY_LIMIT};
