//! Horoscope history repository
//!
//! `horoscope_history` holds at most one row per (user_id, date); the
//! UNIQUE constraint on that pair is what settles concurrent first reads.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Horoscope history row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HoroscopeEntryRecord {
    pub user_id: Uuid,
    pub zodiac_sign: String,
    pub date: NaiveDate,
    pub horoscope_text: String,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a day's horoscope
#[derive(Debug, Clone)]
pub struct CreateHoroscopeEntry {
    pub user_id: Uuid,
    pub zodiac_sign: String,
    pub date: NaiveDate,
    pub horoscope_text: String,
}

/// Horoscope history repository
pub struct HoroscopeRepository;

impl HoroscopeRepository {
    /// Entry for a user on a given day
    pub async fn find_for_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<HoroscopeEntryRecord>> {
        let entry = sqlx::query_as::<_, HoroscopeEntryRecord>(
            r#"
            SELECT user_id, zodiac_sign, date, horoscope_text, created_at
            FROM horoscope_history
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    /// Insert the entry unless one already exists for (user_id, date)
    ///
    /// Returns `None` when another writer got there first; the existing
    /// row is left untouched.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: CreateHoroscopeEntry,
    ) -> Result<Option<HoroscopeEntryRecord>> {
        let entry = sqlx::query_as::<_, HoroscopeEntryRecord>(
            r#"
            INSERT INTO horoscope_history (user_id, zodiac_sign, date, horoscope_text)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, date) DO NOTHING
            RETURNING user_id, zodiac_sign, date, horoscope_text, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.zodiac_sign)
        .bind(input.date)
        .bind(input.horoscope_text)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    /// Most recent entries for a user, newest first
    pub async fn recent(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<HoroscopeEntryRecord>> {
        let entries = sqlx::query_as::<_, HoroscopeEntryRecord>(
            r#"
            SELECT user_id, zodiac_sign, date, horoscope_text, created_at
            FROM horoscope_history
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Number of entries stored for a user on a day (0 or 1)
    pub async fn count_for_date(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM horoscope_history
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
