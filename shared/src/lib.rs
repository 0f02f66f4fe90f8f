//! Daily Horoscope Shared Library
//!
//! Pure domain logic used by the backend: zodiac resolution, the horoscope
//! catalog, input validation and the JSON types of the public API.

pub mod catalog;
pub mod errors;
pub mod types;
pub mod validation;
pub mod zodiac;

// Re-export commonly used items
pub use catalog::HoroscopeCatalog;
pub use errors::*;
pub use zodiac::{parse_birthdate, ZodiacSign};
