//! Append-only SQLite log of answered questions.

use serde::ser::{Serialize, Serializer};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// One answered question. Serialized as `[id, question, answer]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.id, &self.question, &self.answer).serialize(serializer)
    }
}

impl From<(i64, String, String)> for LogEntry {
    fn from((id, question, answer): (i64, String, String)) -> Self {
        Self {
            id,
            question,
            answer,
        }
    }
}

#[derive(Clone)]
pub struct LogStore {
    pool: SqlitePool,
}

impl LogStore {
    /// Opens (creating if missing) the database at `database_url` and applies migrations.
    ///
    /// `sqlite::memory:` gets a single connection that is never recycled, otherwise
    /// every pooled connection would see its own empty database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(30))
                .connect_with(options.busy_timeout(Duration::from_secs(30)))
                .await?
        };

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(database = database_url, "log store ready");

        Ok(Self { pool })
    }

    pub async fn append(&self, question: &str, answer: &str) -> Result<LogEntry, StoreError> {
        let result = sqlx::query("INSERT INTO logs (question, answer) VALUES (?, ?)")
            .bind(question)
            .bind(answer)
            .execute(&self.pool)
            .await?;

        Ok(LogEntry {
            id: result.last_insert_rowid(),
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }

    /// Full history in insertion order. Unbounded.
    pub async fn all(&self) -> Result<Vec<LogEntry>, StoreError> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, question, answer FROM logs ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(LogEntry::from).collect())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
