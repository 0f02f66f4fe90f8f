//! Input validation functions
//!
//! Format checks applied to signup input after the required-field and
//! duplicate-email checks have passed.

use chrono::NaiveDate;
use regex_lite::Regex;
use std::sync::OnceLock;

/// Maximum accepted length of a display name
pub const MAX_NAME_LEN: usize = 100;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Returns true when the value is absent or only whitespace
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Trim and lowercase an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email_regex().is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be at most {} characters", MAX_NAME_LEN));
    }
    Ok(())
}

/// Birthdates may not lie after `today`
pub fn validate_birthdate(birthdate: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if birthdate > today {
        return Err("Birthdate cannot be in the future".to_string());
    }
    Ok(())
}
