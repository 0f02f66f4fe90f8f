//! Horoscope service
//!
//! Today's horoscope is computed once per user per calendar day and then
//! served from `horoscope_history`. Concurrent first requests are settled
//! by the (user_id, date) uniqueness constraint: the losing insert writes
//! nothing and the service reads back the winner's row.

use crate::error::ApiError;
use crate::repositories::{CreateHoroscopeEntry, HoroscopeEntryRecord, HoroscopeRepository};
use chrono::{Local, NaiveDate};
use horoscope_shared::types::DailyHoroscope;
use horoscope_shared::{HoroscopeCatalog, ZodiacSign};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Maximum number of entries returned by the history endpoint
pub const HISTORY_LIMIT: i64 = 7;

fn to_daily(entry: HoroscopeEntryRecord) -> Result<DailyHoroscope, ApiError> {
    let zodiac_sign = entry
        .zodiac_sign
        .parse::<ZodiacSign>()
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(DailyHoroscope {
        date: entry.date,
        zodiac_sign,
        horoscope: entry.horoscope_text,
    })
}

/// Horoscope lookup and history
pub struct HoroscopeService;

impl HoroscopeService {
    /// Today's horoscope for a user, by the server's local calendar
    pub async fn get_today(
        pool: &PgPool,
        catalog: &HoroscopeCatalog,
        user_id: Uuid,
        zodiac_sign: ZodiacSign,
    ) -> Result<DailyHoroscope, ApiError> {
        let today = Local::now().date_naive();
        Self::get_for_date(pool, catalog, user_id, zodiac_sign, today).await
    }

    /// Horoscope for a user on `date`, computed and stored on first request
    pub async fn get_for_date(
        pool: &PgPool,
        catalog: &HoroscopeCatalog,
        user_id: Uuid,
        zodiac_sign: ZodiacSign,
        date: NaiveDate,
    ) -> Result<DailyHoroscope, ApiError> {
        if let Some(existing) = HoroscopeRepository::find_for_date(pool, user_id, date)
            .await
            .map_err(ApiError::Internal)?
        {
            debug!(user_id = %user_id, %date, "Horoscope cache hit");
            return to_daily(existing);
        }

        let text = catalog.select(zodiac_sign, date);
        let inserted = HoroscopeRepository::insert_if_absent(
            pool,
            CreateHoroscopeEntry {
                user_id,
                zodiac_sign: zodiac_sign.to_string(),
                date,
                horoscope_text: text.to_string(),
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        if let Some(entry) = inserted {
            info!(user_id = %user_id, %date, zodiac_sign = %zodiac_sign, "Horoscope recorded");
            return to_daily(entry);
        }

        // A concurrent request stored today's entry first; serve that one
        debug!(user_id = %user_id, %date, "Lost insert race, reading stored horoscope");
        let winner = HoroscopeRepository::find_for_date(pool, user_id, date)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!(
                    "horoscope for user {} on {} neither inserted nor found",
                    user_id,
                    date
                ))
            })?;

        to_daily(winner)
    }

    /// Up to [`HISTORY_LIMIT`] most recent horoscopes, newest first
    pub async fn get_history(pool: &PgPool, user_id: Uuid) -> Result<Vec<DailyHoroscope>, ApiError> {
        HoroscopeRepository::recent(pool, user_id, HISTORY_LIMIT)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(to_daily)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_record_maps_to_daily_horoscope() {
        let record = HoroscopeEntryRecord {
            user_id: Uuid::new_v4(),
            zodiac_sign: "Aries".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            horoscope_text: "A surprise encounter could change your perspective today.".to_string(),
            created_at: Utc::now(),
        };

        let daily = to_daily(record).unwrap();
        assert_eq!(daily.zodiac_sign, ZodiacSign::Aries);
        assert_eq!(daily.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_corrupt_sign_is_internal_error() {
        let record = HoroscopeEntryRecord {
            user_id: Uuid::new_v4(),
            zodiac_sign: "Ophiuchus".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            horoscope_text: "?".to_string(),
            created_at: Utc::now(),
        };

        assert!(matches!(to_daily(record), Err(ApiError::Internal(_))));
    }
}
