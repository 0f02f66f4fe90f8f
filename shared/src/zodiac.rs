//! Zodiac sign resolution
//!
//! Maps a birth date to one of the twelve tropical zodiac signs.

use crate::errors::ZodiacError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the twelve tropical zodiac signs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// First day (month, day) of each sign, in calendar order starting in January.
/// Capricorn wraps the year end and is handled by the fallthrough.
const SIGN_STARTS: [((u32, u32), ZodiacSign); 11] = [
    ((1, 20), ZodiacSign::Aquarius),
    ((2, 19), ZodiacSign::Pisces),
    ((3, 21), ZodiacSign::Aries),
    ((4, 20), ZodiacSign::Taurus),
    ((5, 21), ZodiacSign::Gemini),
    ((6, 21), ZodiacSign::Cancer),
    ((7, 23), ZodiacSign::Leo),
    ((8, 23), ZodiacSign::Virgo),
    ((9, 23), ZodiacSign::Libra),
    ((10, 23), ZodiacSign::Scorpio),
    ((11, 22), ZodiacSign::Sagittarius),
];

impl ZodiacSign {
    /// All signs in zodiac order, starting with Aries
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Resolve the sign for a birth date. Total over valid dates.
    pub fn from_birthdate(date: NaiveDate) -> Self {
        let key = (date.month(), date.day());
        // Dec 22 onward is Capricorn again
        if key >= (12, 22) {
            return ZodiacSign::Capricorn;
        }
        SIGN_STARTS
            .iter()
            .rev()
            .find(|(start, _)| key >= *start)
            .map(|(_, sign)| *sign)
            .unwrap_or(ZodiacSign::Capricorn)
    }

    /// Position in [`ZodiacSign::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacSign {
    type Err = ZodiacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|sign| sign.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ZodiacError::UnknownSign(s.to_string()))
    }
}

/// Parse a `YYYY-MM-DD` birth date
pub fn parse_birthdate(input: &str) -> Result<NaiveDate, ZodiacError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ZodiacError::InvalidDate(trimmed.to_string()))
}
