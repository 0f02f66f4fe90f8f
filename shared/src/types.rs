//! API request and response types

use crate::zodiac::ZodiacSign;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Authentication
// ============================================================================

/// Signup request
///
/// Fields are optional so that absent values surface as a validation error
/// rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public projection of a user; never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub zodiac_sign: ZodiacSign,
}

/// Signup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

// ============================================================================
// Horoscope
// ============================================================================

/// A horoscope for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHoroscope {
    pub date: NaiveDate,
    pub zodiac_sign: ZodiacSign,
    pub horoscope: String,
}

/// Most recent horoscopes, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoroscopeHistory {
    pub history: Vec<DailyHoroscope>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_uses_camel_case() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            zodiac_sign: ZodiacSign::Aries,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["zodiacSign"], "Aries");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_daily_horoscope_date_format() {
        let entry = DailyHoroscope {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            zodiac_sign: ZodiacSign::Leo,
            horoscope: "Shine bright!".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["zodiacSign"], "Leo");
    }

    #[test]
    fn test_signup_request_tolerates_missing_fields() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.co"));
        assert!(req.name.is_none());
        assert!(req.birthdate.is_none());
    }
}
