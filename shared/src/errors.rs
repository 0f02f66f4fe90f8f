//! Error types shared by the horoscope crates

use thiserror::Error;

/// Errors raised while resolving zodiac data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZodiacError {
    #[error("Invalid birthdate '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown zodiac sign: {0}")]
    UnknownSign(String),
}
