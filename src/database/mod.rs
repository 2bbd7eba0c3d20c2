use std::path::Path;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

mod request_error;
pub mod requests;
mod score;

pub use request_error::*;
pub use score::{Score, ScoreCreateRequest, ScoreTime};

pub type DatabasePool = SqlitePool;

const CREATE_SCORES_TABLE: &str = "CREATE TABLE IF NOT EXISTS scores (
    level TEXT NOT NULL,
    username TEXT NOT NULL,
    time REAL NOT NULL,
    date TEXT NOT NULL
)";

const CREATE_LEVEL_INDEX: &str = "CREATE INDEX IF NOT EXISTS scores_level ON scores(level)";

/// Owns the connection pool and mediates every read and write of the `scores` table.
pub struct ScoreStore {
    pool: DatabasePool,
}

impl ScoreStore {
    /// Opens (creating if needed) the database file at `path` and makes sure
    /// the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> sqlx::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let store = Self { pool };
        store.initialize().await?;
        info!(path = %path.display(), "opened score database");
        Ok(store)
    }

    async fn initialize(&self) -> sqlx::Result<()> {
        sqlx::query(CREATE_SCORES_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_LEVEL_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Stores a new score for `level`, stamped with the current server time.
    /// Returns the score exactly as it was written.
    pub async fn insert_score(
        &self,
        level: &str,
        request: &ScoreCreateRequest,
    ) -> sqlx::Result<Score> {
        let score = Score {
            level: level.to_owned(),
            username: request.username.clone(),
            time: request.time,
            date: Utc::now(),
        };

        sqlx::query("INSERT INTO scores (level, username, time, date) VALUES (?, ?, ?, ?)")
            .bind(score.level.as_str())
            .bind(score.username.as_str())
            .bind(score.time)
            .bind(score.date)
            .execute(&self.pool)
            .await?;

        debug!(level = %level, username = %score.username, time = score.time, "inserted score");
        Ok(score)
    }

    /// Fetches at most `limit` scores for `level`, best (lowest) time first.
    /// Equal times keep submission order.
    pub async fn list_scores(&self, level: &str, limit: u64) -> sqlx::Result<Vec<Score>> {
        // SQLite takes a signed 64-bit LIMIT
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        sqlx::query_as::<_, Score>(
            "SELECT level, username, time, date FROM scores \
             WHERE level = ? ORDER BY time ASC, rowid ASC LIMIT ?",
        )
        .bind(level)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
