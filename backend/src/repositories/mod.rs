//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod horoscope;
pub mod user;

pub use horoscope::{CreateHoroscopeEntry, HoroscopeEntryRecord, HoroscopeRepository};
pub use user::{CreateUser, UserRecord, UserRepository};
