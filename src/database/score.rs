use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

// Types stored in the `scores` table:
// level    TEXT
// username TEXT
// time     REAL (seconds)
// date     TEXT (RFC 3339, UTC)

/// Completion time of a level, in seconds.
pub type ScoreTime = f64;

/// A submitted completion time, as stored in the database.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, sqlx::FromRow)]
#[serde(crate = "rocket::serde")]
pub struct Score {
    /// The level is part of the request path, so it never goes over the wire.
    #[serde(skip)]
    pub level: String,
    pub username: String,
    pub time: ScoreTime,
    pub date: DateTime<Utc>,
}

/// Body of a score submission. The date is always assigned by the server.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ScoreCreateRequest {
    pub username: String,
    pub time: ScoreTime,
}

#[cfg(test)]
impl ScoreCreateRequest {
    pub fn new(username: impl Into<String>, time: ScoreTime) -> Self {
        Self {
            username: username.into(),
            time,
        }
    }
}
