use crate::config::{APP_CONFIG, CSV_TRACKER_EXPRIED_TIME, JWT_EXPRIED_TIME};
use anyhow::{Context, Result};
use chrono::Utc;
use once_cell::sync::Lazy;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};

pub static REDIS_CLIENT: Lazy<redis::Client> = Lazy::new(|| {
    redis::Client::open(APP_CONFIG.redis_url.as_str()).expect("Failed to create Redis client")
});

pub async fn init_redis_connection() -> Result<()> {
    // Test connection
    let mut conn = REDIS_CLIENT
        .get_connection_manager()
        .await
        .context("Failed to get Redis connection")?;

    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .context("Failed to ping Redis")?;

    Ok(())
}

pub async fn get_redis() -> Result<ConnectionManager> {
    REDIS_CLIENT
        .get_connection_manager()
        .await
        .context("Failed to get Redis connection")
}

pub struct JwtBlacklist;

impl JwtBlacklist {
    pub async fn add_jwt_to_blacklist(user_id: &str, jwt: &str) -> Result<()> {
        let mut redis = get_redis()
            .await
            .context("Failed to get Redis connection")?;

        let key = format!("jwt:blacklist:{}:{}", user_id, jwt);
        let now = Utc::now().timestamp();
        let _: () = redis.set_ex(&key, now, JWT_EXPRIED_TIME as u64).await?;
        Ok(())
    }

    pub async fn check_jwt_in_blacklist(user_id: &str, jwt: &str) -> Result<bool> {
        let mut redis = get_redis()
            .await
            .context("Failed to get Redis connection")?;

        let key = format!("jwt:blacklist:{}:{}", user_id, jwt);
        let exists: bool = redis.exists(&key).await?;
        Ok(exists)
    }
}

/// Progress of a bulk CSV enrollment upload, keyed by file name and polled
/// by the admin UI while rows are processed.
pub struct EnrollmentTrackProgress;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentProgress {
    pub total: u64,
    pub current: u64,
    pub percent: u64,
    pub success: u64,
    pub failed: u64,
}

impl EnrollmentTrackProgress {
    pub async fn set_total(file_name: &str, total: u64) -> Result<()> {
        let mut redis = get_redis()
            .await
            .context("Failed to get Redis connection")?;

        let key = format!("enrollment_tracker:{}", file_name);
        let _: () = redis
            .set_ex(&key, total, CSV_TRACKER_EXPRIED_TIME as u64)
            .await?;

        Ok(())
    }

    pub async fn set_current(file_name: &str, current: u64) -> Result<()> {
        let mut redis = get_redis()
            .await
            .context("Failed to get Redis connection")?;

        let key = format!("enrollment_progress:{}", file_name);

        if current == 0 {
            let _: () = redis
                .set_ex(&key, 0u64, CSV_TRACKER_EXPRIED_TIME as u64)
                .await?;
            return Ok(());
        }

        let existing: Option<u64> = redis
            .get(&key)
            .await
            .context("Failed to read current enrollment progress from Redis")?;
        let next_value = existing.map(|value| value.max(current)).unwrap_or(current);

        let _: () = redis
            .set_ex(&key, next_value, CSV_TRACKER_EXPRIED_TIME as u64)
            .await?;

        Ok(())
    }

    pub async fn reset_success_failed(file_name: &str) -> Result<()> {
        let mut redis = get_redis()
            .await
            .context("Failed to get Redis connection")?;

        let success_key = format!("enrollment_success:{}", file_name);
        let failed_key = format!("enrollment_failed:{}", file_name);

        let _: () = redis
            .set_ex(&success_key, 0u64, CSV_TRACKER_EXPRIED_TIME as u64)
            .await?;
        let _: () = redis
            .set_ex(&failed_key, 0u64, CSV_TRACKER_EXPRIED_TIME as u64)
            .await?;

        Ok(())
    }

    pub async fn increment_success(file_name: &str) -> Result<()> {
        increment_counter(
            &format!("enrollment_success:{}", file_name),
            CSV_TRACKER_EXPRIED_TIME as u64,
        )
        .await
    }

    pub async fn increment_failed(file_name: &str) -> Result<()> {
        increment_counter(
            &format!("enrollment_failed:{}", file_name),
            CSV_TRACKER_EXPRIED_TIME as u64,
        )
        .await
    }

    pub async fn get_progress(file_name: &str) -> Result<EnrollmentProgress> {
        let mut redis = get_redis()
            .await
            .context("Failed to get Redis connection")?;

        let key_total = format!("enrollment_tracker:{}", file_name);
        let key_current = format!("enrollment_progress:{}", file_name);
        let key_success = format!("enrollment_success:{}", file_name);
        let key_failed = format!("enrollment_failed:{}", file_name);

        let total: Option<u64> = redis
            .get(&key_total)
            .await
            .context("Failed to get enrollment total from Redis")?;
        let current: Option<u64> = redis
            .get(&key_current)
            .await
            .context("Failed to get enrollment progress from Redis")?;

        let total = total.unwrap_or(0);
        let mut current = current.unwrap_or(0);
        if total > 0 && current > total {
            current = total;
        }

        let percent = if total == 0 {
            0
        } else {
            current.saturating_mul(100).checked_div(total).unwrap_or(0)
        };

        let success: Option<u64> = redis
            .get(&key_success)
            .await
            .context("Failed to get success count from Redis")?;
        let failed: Option<u64> = redis
            .get(&key_failed)
            .await
            .context("Failed to get failed count from Redis")?;

        Ok(EnrollmentProgress {
            total,
            current,
            percent,
            success: success.unwrap_or(0),
            failed: failed.unwrap_or(0),
        })
    }
}

async fn increment_counter(key: &str, ttl_seconds: u64) -> Result<()> {
    let mut redis = get_redis()
        .await
        .context("Failed to get Redis connection")?;

    let _: u64 = redis.incr(key, 1u64).await?;
    let _: () = redis.expire(key, ttl_seconds as i64).await?;

    Ok(())
}
