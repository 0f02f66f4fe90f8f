//! Account service: signup, login and profile lookup
//!
//! Password hashing/verification runs on the blocking thread pool and the
//! JWT service is passed by reference (pre-computed keys).

use crate::auth::{JwtService, PasswordService};
use crate::db::is_unique_violation;
use crate::error::ApiError;
use crate::repositories::{CreateUser, UserRecord, UserRepository};
use chrono::{Local, NaiveDate};
use horoscope_shared::types::{LoginResponse, PublicUser};
use horoscope_shared::{parse_birthdate, validation, ZodiacSign};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const DUPLICATE_USER: &str = "User already exists";

/// Raw signup fields as received from the client
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub birthdate: Option<String>,
}

/// Signup fields after presence checks
struct RequiredSignup<'a> {
    name: &'a str,
    email: String,
    password: &'a str,
    birthdate: &'a str,
}

impl SignupInput {
    fn require(&self) -> Result<RequiredSignup<'_>, ApiError> {
        let fields = [&self.name, &self.email, &self.password, &self.birthdate];
        if fields.iter().any(|f| validation::is_blank(f.as_deref())) {
            return Err(ApiError::Validation("All fields are required".to_string()));
        }

        Ok(RequiredSignup {
            name: self.name.as_deref().unwrap_or_default().trim(),
            email: validation::normalize_email(self.email.as_deref().unwrap_or_default()),
            password: self.password.as_deref().unwrap_or_default(),
            birthdate: self.birthdate.as_deref().unwrap_or_default(),
        })
    }
}

/// Format checks run once the email is known to be free
fn validate_signup(input: &RequiredSignup<'_>, today: NaiveDate) -> Result<NaiveDate, ApiError> {
    validation::validate_name(input.name).map_err(ApiError::Validation)?;
    validation::validate_email(&input.email).map_err(ApiError::Validation)?;
    validation::validate_password(input.password).map_err(ApiError::Validation)?;

    let birthdate =
        parse_birthdate(input.birthdate).map_err(|e| ApiError::Validation(e.to_string()))?;
    validation::validate_birthdate(birthdate, today).map_err(ApiError::Validation)?;

    Ok(birthdate)
}

fn to_public(user: UserRecord) -> Result<PublicUser, ApiError> {
    let zodiac_sign = user
        .zodiac_sign
        .parse::<ZodiacSign>()
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(PublicUser {
        id: user.id,
        name: user.name,
        email: user.email,
        zodiac_sign,
    })
}

/// Account service for authentication operations
pub struct AccountService;

impl AccountService {
    /// Register a new user
    ///
    /// A registered email is reported as a conflict before any format
    /// validation runs, so duplicates are always recognisable.
    pub async fn signup(pool: &PgPool, input: SignupInput) -> Result<PublicUser, ApiError> {
        let required = input.require()?;

        if UserRepository::email_exists(pool, &required.email)
            .await
            .map_err(ApiError::Internal)?
        {
            warn!(email = %required.email, "Signup with registered email");
            return Err(ApiError::Conflict(DUPLICATE_USER.to_string()));
        }

        let birthdate = validate_signup(&required, Local::now().date_naive())?;
        let zodiac_sign = ZodiacSign::from_birthdate(birthdate);

        let password_hash = PasswordService::hash_async(required.password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let created = UserRepository::create(
            pool,
            CreateUser {
                name: required.name.to_string(),
                email: required.email.clone(),
                password_hash,
                birthdate,
                zodiac_sign: zodiac_sign.to_string(),
            },
        )
        .await;

        let user = match created {
            Ok(user) => user,
            // Lost a race with a concurrent signup for the same email
            Err(e) if is_unique_violation(&e) => {
                return Err(ApiError::Conflict(DUPLICATE_USER.to_string()));
            }
            Err(e) => return Err(ApiError::Internal(e)),
        };

        info!(user_id = %user.id, zodiac_sign = %zodiac_sign, "User registered");
        to_public(user)
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<LoginResponse, ApiError> {
        let (email, password) = match (email, password) {
            (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
            _ => {
                return Err(ApiError::Validation(
                    "Email and password are required".to_string(),
                ))
            }
        };
        let email = validation::normalize_email(email);

        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?;

        // Both failure paths pay for one hash verification
        let user = match user {
            Some(user) => {
                let valid = PasswordService::verify_async(
                    password.to_string(),
                    user.password_hash.clone(),
                )
                .await
                .map_err(ApiError::Internal)?;
                if !valid {
                    warn!(user_id = %user.id, "Login with wrong password");
                    return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
                }
                user
            }
            None => {
                PasswordService::verify_dummy_async(password.to_string())
                    .await
                    .map_err(ApiError::Internal)?;
                warn!(email = %email, "Login for unknown email");
                return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let public = to_public(user)?;
        let token = jwt_service
            .issue_token(public.id, &public.email, public.zodiac_sign)
            .map_err(ApiError::Internal)?;

        info!(user_id = %public.id, "User logged in");
        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user: public,
        })
    }

    /// Public profile of an authenticated user
    pub async fn profile(pool: &PgPool, user_id: Uuid) -> Result<PublicUser, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        to_public(user)
    }
}
