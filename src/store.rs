//! SQLite persistence for analyzed emails.
//!
//! The engine never writes here itself; callers run `analyze` and hand the
//! result to [`save_analysis`]. One row per email, one child row per
//! indicator. Indicator order is not stored, it is re-derived on read by
//! sorting on the `weight` column, which reproduces the engine's ordering.

use chrono::Utc;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::analyzer::SpamAnalysisResult;
use crate::normalization::EmailInput;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Which slice of the mailbox to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailFilter {
    #[default]
    All,
    /// status = inbox and not flagged as spam
    Inbox,
    /// flagged as spam, regardless of status
    Spam,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, serde::Serialize)]
pub struct EmailRecord {
    pub id: String,
    pub sender_email: String,
    pub sender_name: String,
    pub subject: String,
    pub body: String,
    pub received_at: String,
    pub is_spam: bool,
    pub spam_score: i64,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, serde::Serialize)]
pub struct IndicatorRecord {
    pub id: String,
    pub email_id: String,
    pub indicator_type: String,
    pub indicator_value: String,
    pub weight: i64,
    pub created_at: String,
}

pub async fn init_db(database_url: &str) -> Result<SqlitePool, StoreError> {
    info!("Initializing database at: {database_url}");

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS emails (
            id TEXT PRIMARY KEY,
            sender_email TEXT NOT NULL,
            sender_name TEXT NOT NULL DEFAULT '',
            subject TEXT NOT NULL,
            body TEXT NOT NULL,
            received_at TEXT NOT NULL,
            is_spam BOOLEAN NOT NULL DEFAULT FALSE,
            spam_score INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'inbox',
            created_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS spam_indicators (
            id TEXT PRIMARY KEY,
            email_id TEXT NOT NULL,
            indicator_type TEXT NOT NULL,
            indicator_value TEXT NOT NULL,
            weight INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            FOREIGN KEY(email_id) REFERENCES emails(id)
        );
        "#,
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

/// Persist one analyzed email plus its indicator rows.
pub async fn save_analysis(
    pool: &SqlitePool,
    input: &EmailInput,
    analysis: &SpamAnalysisResult,
) -> Result<EmailRecord, StoreError> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    let status = if analysis.is_spam { "spam" } else { "inbox" };

    let mut tx = pool.begin().await?;

    let email = sqlx::query_as::<_, EmailRecord>(
        r#"
        INSERT INTO emails (id, sender_email, sender_name, subject, body,
                            received_at, is_spam, spam_score, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, sender_email, sender_name, subject, body,
                  received_at, is_spam, spam_score, status, created_at
        "#,
    )
    .bind(&id)
    .bind(&input.sender_email)
    .bind(&input.sender_name)
    .bind(&input.subject)
    .bind(&input.body)
    .bind(&now)
    .bind(analysis.is_spam)
    .bind(analysis.spam_score as i64)
    .bind(status)
    .bind(&now)
    .fetch_one(&mut *tx)
    .await?;

    for indicator in &analysis.indicators {
        sqlx::query(
            r#"
            INSERT INTO spam_indicators (id, email_id, indicator_type,
                                         indicator_value, weight, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&id)
        .bind(indicator.indicator_type.as_str())
        .bind(&indicator.value)
        .bind(indicator.weight as i64)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(email)
}

pub async fn list_emails(
    pool: &SqlitePool,
    filter: EmailFilter,
) -> Result<Vec<EmailRecord>, StoreError> {
    let base = r#"
        SELECT id, sender_email, sender_name, subject, body,
               received_at, is_spam, spam_score, status, created_at
        FROM emails
    "#;
    let query = match filter {
        EmailFilter::All => format!("{base} ORDER BY received_at DESC"),
        EmailFilter::Inbox => {
            format!("{base} WHERE status = 'inbox' AND is_spam = FALSE ORDER BY received_at DESC")
        }
        EmailFilter::Spam => format!("{base} WHERE is_spam = TRUE ORDER BY received_at DESC"),
    };

    Ok(sqlx::query_as::<_, EmailRecord>(&query)
        .fetch_all(pool)
        .await?)
}

/// One email with its indicators, heaviest first. `Ok(None)` when the id is
/// unknown.
pub async fn fetch_email(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<(EmailRecord, Vec<IndicatorRecord>)>, StoreError> {
    let email = sqlx::query_as::<_, EmailRecord>(
        r#"
        SELECT id, sender_email, sender_name, subject, body,
               received_at, is_spam, spam_score, status, created_at
        FROM emails
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(email) = email else {
        return Ok(None);
    };

    let indicators = sqlx::query_as::<_, IndicatorRecord>(
        r#"
        SELECT id, email_id, indicator_type, indicator_value, weight, created_at
        FROM spam_indicators
        WHERE email_id = ?
        ORDER BY weight DESC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some((email, indicators)))
}

pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: &str,
    is_spam: Option<bool>,
) -> Result<EmailRecord, StoreError> {
    let email = match is_spam {
        Some(flag) => {
            sqlx::query_as::<_, EmailRecord>(
                r#"
                UPDATE emails SET status = ?, is_spam = ?
                WHERE id = ?
                RETURNING id, sender_email, sender_name, subject, body,
                          received_at, is_spam, spam_score, status, created_at
                "#,
            )
            .bind(status)
            .bind(flag)
            .bind(id)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, EmailRecord>(
                r#"
                UPDATE emails SET status = ?
                WHERE id = ?
                RETURNING id, sender_email, sender_name, subject, body,
                          received_at, is_spam, spam_score, status, created_at
                "#,
            )
            .bind(status)
            .bind(id)
            .fetch_optional(pool)
            .await?
        }
    };

    email.ok_or(StoreError::NotFound)
}

pub async fn delete_email(pool: &SqlitePool, id: &str) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM spam_indicators WHERE email_id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let result = sqlx::query("DELETE FROM emails WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
